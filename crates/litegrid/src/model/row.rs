use litegrid_core::Value;

/// Per-row pending state.
///
/// Transitions: `Clean → Dirty` on a cell edit, back to `Clean` on a
/// successful flush. `Clean/Dirty → DeletePending` on a delete request while
/// a transaction scope is open; the row is purged on commit or restored on
/// rollback. With no scope open a delete executes immediately and the row
/// never passes through `DeletePending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    /// Loaded from committed data, no buffered changes.
    Clean,
    /// Has buffered cell edits (or is a new row) not yet flushed to storage.
    Dirty,
    /// Deletion requested inside an open transaction scope; deferred until
    /// commit.
    DeletePending,
}

/// One visible row: its surrogate-key identity as captured at load time plus
/// the buffered field values.
///
/// Index positions are not identities; they shift as rows are inserted and
/// deleted. Every storage operation addresses the row through `rowid`.
#[derive(Debug, Clone)]
pub(crate) struct Row {
    /// Surrogate key; `None` until a freshly inserted row is flushed.
    pub(crate) rowid: Option<i64>,

    /// Buffered cell values, one per table column.
    pub(crate) values: Vec<Value>,

    pub(crate) state: RowState,
}

impl Row {
    pub(crate) fn clean(rowid: Option<i64>, values: Vec<Value>) -> Self {
        Self {
            rowid,
            values,
            state: RowState::Clean,
        }
    }

    /// A new, never-flushed row with empty fields.
    pub(crate) fn fresh(width: usize) -> Self {
        Self {
            rowid: None,
            values: vec![Value::Null; width],
            state: RowState::Dirty,
        }
    }
}
