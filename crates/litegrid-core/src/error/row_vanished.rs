use super::Error;

/// Error when a targeted row's identity no longer matches any storage row at
/// flush time (concurrent external mutation).
///
/// Kept distinct from validation errors so the caller can choose to refresh
/// rather than retry the same edit.
#[derive(Debug)]
pub(super) struct RowVanishedError {
    context: Box<str>,
}

impl std::error::Error for RowVanishedError {}

impl core::fmt::Display for RowVanishedError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "row vanished: {}", self.context)
    }
}

impl Error {
    /// Creates a row-vanished error with row identity context.
    pub fn row_vanished(context: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::RowVanished(RowVanishedError {
            context: context.into().into(),
        }))
    }

    /// Returns `true` if this error is a row-vanished error.
    pub fn is_row_vanished(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::RowVanished(_))
    }
}
