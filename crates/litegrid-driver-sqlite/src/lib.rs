mod value;
use value::{from_sql, SqlValue};

use litegrid_core::{
    driver::{Connection, Response, Rows},
    schema::Column,
    Error, Result, Value,
};
use litegrid_sql::ident;
use rusqlite::Connection as RusqliteConnection;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// SQLite database location.
#[derive(Debug)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver with an arbitrary connection URL
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(Error::storage)?;

        if url.scheme() != "sqlite" {
            return Err(litegrid_core::err!(
                "connection URL does not have a `sqlite` scheme; url={}",
                url_str
            ));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }

    /// Connect, yielding a live connection.
    pub fn connect(&self) -> Result<SqliteConnection> {
        let connection = match self {
            Sqlite::File(path) => RusqliteConnection::open(path).map_err(Error::storage)?,
            Sqlite::InMemory => RusqliteConnection::open_in_memory().map_err(Error::storage)?,
        };
        Ok(SqliteConnection { connection })
    }
}

#[derive(Debug)]
pub struct SqliteConnection {
    connection: RusqliteConnection,
}

/// Map an engine error onto the core taxonomy: constraint violations are
/// validation failures the caller triggered; everything else means storage
/// could not run the statement.
fn engine_err(err: rusqlite::Error) -> Error {
    if let rusqlite::Error::SqliteFailure(failure, _) = &err {
        if failure.code == rusqlite::ErrorCode::ConstraintViolation {
            return Error::validation(err.to_string());
        }
    }
    Error::storage(err)
}

impl SqliteConnection {
    fn exec_literal(&mut self, sql: &str) -> Result<()> {
        debug!(sql, "exec");
        self.connection.execute(sql, []).map_err(engine_err)?;
        Ok(())
    }
}

impl Connection for SqliteConnection {
    fn exec(&mut self, sql: &str, params: &[Value]) -> Result<Response> {
        debug!(sql, params = params.len(), "exec");

        let mut stmt = self.connection.prepare_cached(sql).map_err(engine_err)?;
        let params: Vec<SqlValue<'_>> = params.iter().map(SqlValue).collect();

        if stmt.column_count() == 0 {
            let count = stmt
                .execute(rusqlite::params_from_iter(params.iter()))
                .map_err(engine_err)?;
            return Ok(Response::Count(count));
        }

        let columns: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();
        let width = columns.len();

        let mut rows = stmt
            .query(rusqlite::params_from_iter(params.iter()))
            .map_err(engine_err)?;

        let mut values = vec![];
        loop {
            match rows.next() {
                Ok(Some(row)) => {
                    let mut items = Vec::with_capacity(width);
                    for index in 0..width {
                        let value = row.get_ref(index).map_err(engine_err)?;
                        items.push(from_sql(value));
                    }
                    values.push(items);
                }
                Ok(None) => break,
                Err(err) => return Err(engine_err(err)),
            }
        }

        Ok(Response::Rows(Rows { columns, values }))
    }

    fn begin(&mut self) -> Result<()> {
        self.exec_literal("BEGIN")
    }

    fn commit(&mut self) -> Result<()> {
        self.exec_literal("COMMIT")
    }

    fn rollback(&mut self) -> Result<()> {
        self.exec_literal("ROLLBACK")
    }

    fn columns(&mut self, schema: &str, table: &str) -> Result<Vec<Column>> {
        // PRAGMA arguments cannot be bound, so identifiers are quoted into
        // the statement text.
        let sql = format!(
            "PRAGMA {}.table_info({})",
            ident::quote(schema),
            ident::quote(table)
        );
        let rows = self.exec(&sql, &[])?.into_rows()?;

        // table_info columns: cid, name, type, notnull, dflt_value, pk
        Ok(rows
            .values
            .into_iter()
            .map(|row| Column {
                name: row[1].as_text().unwrap_or_default().to_string(),
                ty: row[2].as_text().unwrap_or_default().to_string(),
                nullable: row[3].as_integer() == Some(0),
                primary_key: row[5].as_integer().is_some_and(|pk| pk > 0),
            })
            .collect())
    }

    fn tables(&mut self, schema: &str) -> Result<Vec<String>> {
        self.object_names(schema, "table")
    }

    fn views(&mut self, schema: &str) -> Result<Vec<String>> {
        self.object_names(schema, "view")
    }

    fn schemas(&mut self) -> Result<Vec<String>> {
        let rows = self.exec("PRAGMA database_list", &[])?.into_rows()?;
        // database_list columns: seq, name, file
        Ok(rows
            .values
            .into_iter()
            .map(|row| row[1].as_text().unwrap_or_default().to_string())
            .collect())
    }
}

impl SqliteConnection {
    fn object_names(&mut self, schema: &str, kind: &str) -> Result<Vec<String>> {
        let sql = format!(
            "SELECT \"name\" FROM {}.\"sqlite_master\" \
             WHERE \"type\" = ?1 AND \"name\" NOT LIKE 'sqlite_%' ORDER BY \"name\"",
            ident::quote(schema)
        );
        let rows = self.exec(&sql, &[Value::from(kind)])?.into_rows()?;
        Ok(rows
            .values
            .into_iter()
            .map(|row| row[0].as_text().unwrap_or_default().to_string())
            .collect())
    }
}
