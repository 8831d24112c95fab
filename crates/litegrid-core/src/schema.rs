/// Metadata snapshot for a single table column.
///
/// Sourced from the engine's schema metadata and immutable once fetched for a
/// given table snapshot. Structural changes (an external ALTER) are picked up
/// by re-querying, never by mutating an existing snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// The name of the column in the database.
    pub name: String,

    /// Declared type text, as reported by the engine. Free-form in SQLite;
    /// only used for display and affinity hints, never re-validated locally.
    pub ty: String,

    /// Whether or not the column is nullable.
    pub nullable: bool,

    /// True if the column is part of the table's primary key.
    pub primary_key: bool,
}
