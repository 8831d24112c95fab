use litegrid_core::{driver::Connection, driver::Response, Result, Value};

use std::cell::RefCell;
use std::rc::Rc;

/// Read-only grid over the result of one executed statement.
///
/// Used for ad-hoc statements (including ones produced by the query
/// builder). Rows are fully materialized at execution time and never write
/// back; statements that return no rows are represented by an empty grid
/// plus the affected-row count.
#[derive(Debug, Default)]
pub struct QueryModel {
    columns: Vec<String>,
    values: Vec<Vec<Value>>,
    affected: Option<usize>,
}

impl QueryModel {
    /// Execute `sql` on the shared connection and capture its result.
    pub fn execute<C: Connection>(conn: &Rc<RefCell<C>>, sql: &str) -> Result<Self> {
        match conn.borrow_mut().exec(sql, &[])? {
            Response::Rows(rows) => Ok(Self {
                columns: rows.columns,
                values: rows.values,
                affected: None,
            }),
            Response::Count(count) => Ok(Self {
                columns: Vec::new(),
                values: Vec::new(),
                affected: Some(count),
            }),
        }
    }

    pub fn row_count(&self) -> usize {
        self.values.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Result column name; `None` when the index is stale.
    pub fn column_name(&self, column: usize) -> Option<&str> {
        self.columns.get(column).map(String::as_str)
    }

    /// Value of one result cell; `None` when either index is stale.
    pub fn value(&self, row: usize, column: usize) -> Option<&Value> {
        self.values.get(row)?.get(column)
    }

    /// Affected-row count, for statements that returned no rows.
    pub fn affected(&self) -> Option<usize> {
        self.affected
    }
}
