use super::Error;

/// Error when a table lacks a capability the operation requires.
///
/// The one case today: every surrogate-key candidate name is shadowed by a
/// real column, so rows cannot be addressed by identity and row-level editing
/// is disabled up front.
#[derive(Debug)]
pub(super) struct CapabilityError {
    message: Box<str>,
}

impl std::error::Error for CapabilityError {}

impl core::fmt::Display for CapabilityError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "capability unavailable: {}", self.message)
    }
}

impl Error {
    /// Creates a capability-unavailable error.
    pub fn capability(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Capability(CapabilityError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a capability error.
    pub fn is_capability(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Capability(_))
    }
}
