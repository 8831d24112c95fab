use crate::{Error, Result, Value};

/// Result of executing one statement.
#[derive(Debug)]
pub enum Response {
    /// Number of rows impacted by the operation
    Count(usize),

    /// Operation result, as a grid of rows
    Rows(Rows),
}

/// A fully materialized result grid.
#[derive(Debug, Default)]
pub struct Rows {
    /// Result column names, in projection order.
    pub columns: Vec<String>,

    /// Row values; every inner vec has `columns.len()` entries.
    pub values: Vec<Vec<Value>>,
}

impl Response {
    pub fn is_count(&self) -> bool {
        matches!(self, Self::Count(_))
    }

    pub fn is_rows(&self) -> bool {
        matches!(self, Self::Rows(_))
    }

    /// Unwraps the affected-row count, failing if the statement returned rows.
    pub fn into_count(self) -> Result<usize> {
        match self {
            Self::Count(count) => Ok(count),
            Self::Rows(_) => Err(Error::invalid_result("expected a row count, got rows")),
        }
    }

    /// Unwraps the result rows, failing if the statement returned a count.
    pub fn into_rows(self) -> Result<Rows> {
        match self {
            Self::Rows(rows) => Ok(rows),
            Self::Count(count) => Err(Error::invalid_result(format!(
                "expected rows, got a count of {count}"
            ))),
        }
    }
}
