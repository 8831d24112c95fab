use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum State {
    #[default]
    Inactive,
    Active {
        owner: u64,
    },
}

/// Shared per-connection transaction scope flag.
///
/// Every model attached to one connection holds a clone of the same scope.
/// While the scope is active, destructive operations are deferred so a
/// rollback can restore the original rows. The model that opened the scope
/// is recorded as its owner and is the only one allowed to close it; the
/// others observe the state read-only.
#[derive(Debug, Clone, Default)]
pub struct TransactionScope {
    state: Rc<Cell<State>>,
}

impl TransactionScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state.get(), State::Active { .. })
    }

    pub(crate) fn owner(&self) -> Option<u64> {
        match self.state.get() {
            State::Active { owner } => Some(owner),
            State::Inactive => None,
        }
    }

    /// Open the scope on behalf of `owner`. Returns false if already open.
    pub(crate) fn open(&self, owner: u64) -> bool {
        if self.is_active() {
            return false;
        }
        self.state.set(State::Active { owner });
        true
    }

    /// Close the scope. Only the recorded owner may close it.
    pub(crate) fn close(&self, owner: u64) -> bool {
        if self.owner() != Some(owner) {
            return false;
        }
        self.state.set(State::Inactive);
        true
    }
}
