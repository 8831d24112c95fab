mod response;
pub use response::{Response, Rows};

use crate::{schema::Column, Result, Value};

use std::fmt::Debug;

/// A live connection to the embedded engine.
///
/// Folds the three collaborator surfaces the model layer depends on:
/// statement execution, the transaction primitive, and schema metadata
/// lookup. Calls are synchronous and block until the engine returns; there is
/// no cancellation primitive for a running statement.
///
/// Metadata methods re-query the engine on every call. No caching lives
/// behind this trait, so structural changes made elsewhere are visible the
/// next time a method is called.
pub trait Connection: Debug {
    /// Execute a statement, returning either result rows or an affected-row
    /// count. `params` bind positional placeholders in `sql`.
    fn exec(&mut self, sql: &str, params: &[Value]) -> Result<Response>;

    /// Begin a transaction on the connection.
    fn begin(&mut self) -> Result<()>;

    /// Commit the open transaction.
    fn commit(&mut self) -> Result<()>;

    /// Roll back the open transaction.
    fn rollback(&mut self) -> Result<()>;

    /// Ordered column metadata for a table.
    fn columns(&mut self, schema: &str, table: &str) -> Result<Vec<Column>>;

    /// Table names in a schema.
    fn tables(&mut self, schema: &str) -> Result<Vec<String>>;

    /// View names in a schema.
    fn views(&mut self, schema: &str) -> Result<Vec<String>>;

    /// Names of all attached schemas.
    fn schemas(&mut self) -> Result<Vec<String>>;
}
