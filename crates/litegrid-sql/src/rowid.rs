use litegrid_core::schema::Column;

/// Surrogate-key candidate names, in resolution priority order.
pub const ROWID_CANDIDATES: [&str; 3] = ["rowid", "_rowid_", "oid"];

/// Resolve the row-identity alias for a table.
///
/// SQLite exposes the rowid under any of three names unless a real column
/// shadows it. Picks the first candidate not used by a real column
/// (case-insensitive, as the engine treats identifiers). `None` means every
/// candidate is shadowed: the table has no usable surrogate key and
/// row-level editing must be reported as unavailable up front.
pub fn rowid_alias(columns: &[Column]) -> Option<&'static str> {
    ROWID_CANDIDATES
        .into_iter()
        .find(|candidate| !columns.iter().any(|c| c.name.eq_ignore_ascii_case(candidate)))
}
