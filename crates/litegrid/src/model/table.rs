use super::{Row, RowState, TransactionScope};

use litegrid_core::{bail, driver::Connection, schema::Column, Error, Result, Value};
use litegrid_sql as sql;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

static NEXT_MODEL_ID: AtomicU64 = AtomicU64::new(1);

/// Editable grid over one live database table.
///
/// Presents the committed rows plus any pending local edits as an ordered,
/// index-addressable sequence. Cell edits are buffered per row and written
/// through by [`flush_row`]; deletes are executed immediately, or deferred
/// while a transaction scope is open so rollback can restore the rows.
///
/// Consumers share the model through `Rc<RefCell<TableModel>>`; all
/// index-based reads are bounds-checked, so a stale index held by one view
/// cannot corrupt another.
///
/// [`flush_row`]: TableModel::flush_row
#[derive(Debug)]
pub struct TableModel<C> {
    conn: Rc<RefCell<C>>,
    scope: TransactionScope,
    id: u64,
    schema: String,
    table: String,
    columns: Vec<Column>,
    rowid_alias: Option<&'static str>,
    rows: Vec<Row>,
}

impl<C: Connection> TableModel<C> {
    /// Open a model over `schema.table` and load its current rows.
    ///
    /// Resolves the surrogate-key alias from the table's real column names.
    /// A table that shadows every candidate still opens, but read-only:
    /// [`is_editable`] reports false and every mutating operation fails with
    /// the capability error.
    ///
    /// [`is_editable`]: TableModel::is_editable
    pub fn open(
        conn: Rc<RefCell<C>>,
        scope: TransactionScope,
        schema: &str,
        table: &str,
    ) -> Result<Self> {
        let columns = conn.borrow_mut().columns(schema, table)?;
        if columns.is_empty() {
            bail!("no such table: {schema}.{table}");
        }
        let rowid_alias = sql::rowid_alias(&columns);

        let mut model = Self {
            conn,
            scope,
            id: NEXT_MODEL_ID.fetch_add(1, Ordering::Relaxed),
            schema: schema.to_string(),
            table: table.to_string(),
            columns,
            rowid_alias,
            rows: Vec::new(),
        };
        model.select()?;
        Ok(model)
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Column metadata snapshot fetched at open time.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The resolved surrogate-key alias, if the table has one.
    pub fn rowid_alias(&self) -> Option<&str> {
        self.rowid_alias
    }

    /// False when every surrogate-key candidate is shadowed by a real
    /// column; mutating operations are then unavailable.
    pub fn is_editable(&self) -> bool {
        self.rowid_alias.is_some()
    }

    /// True while a transaction scope is open on the shared connection,
    /// whether or not this model owns it.
    pub fn pending_transaction(&self) -> bool {
        self.scope.is_active()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Buffered value of one cell. `None` when either index is stale.
    pub fn value(&self, row: usize, column: usize) -> Option<&Value> {
        self.rows.get(row)?.values.get(column)
    }

    /// Pending state of one row, for display (edit markers, strike-through).
    /// Pure read; `None` when the index is stale.
    pub fn row_state(&self, row: usize) -> Option<RowState> {
        self.rows.get(row).map(|r| r.state)
    }

    /// True when the row is pending deletion in the open scope.
    pub fn is_deleted(&self, row: usize) -> bool {
        self.row_state(row) == Some(RowState::DeletePending)
    }

    fn require_editable(&self) -> Result<&'static str> {
        self.rowid_alias.ok_or_else(|| {
            Error::capability(format!(
                "table {}.{} shadows rowid, _rowid_ and oid; rows cannot be addressed by identity",
                self.schema, self.table
            ))
        })
    }

    /// Re-read the table's committed rows, discarding all pending state.
    ///
    /// Pending state is only meaningful while its owning scope is open;
    /// refresh assumes a clean baseline. On storage failure the visible
    /// state is left unchanged.
    pub fn select(&mut self) -> Result<()> {
        let stmt = sql::select_rows(&self.schema, &self.table, self.rowid_alias, &self.columns);
        let rows = self.conn.borrow_mut().exec(&stmt, &[])?.into_rows()?;

        let keyed = self.rowid_alias.is_some();
        let mut loaded = Vec::with_capacity(rows.values.len());
        for mut values in rows.values {
            let rowid = if keyed {
                let first = values.remove(0);
                Some(first.as_integer().ok_or_else(|| {
                    Error::invalid_result(format!(
                        "surrogate key of {}.{} is not an integer: {first:?}",
                        self.schema, self.table
                    ))
                })?)
            } else {
                None
            };
            loaded.push(Row::clean(rowid, values));
        }

        debug!(
            table = %self.table,
            rows = loaded.len(),
            "select"
        );
        self.rows = loaded;
        Ok(())
    }

    /// Create a new row in the Dirty state at `at`, with empty field values.
    /// Touches no storage until the row is flushed.
    pub fn insert_row(&mut self, at: usize) -> Result<()> {
        self.require_editable()?;
        if at > self.rows.len() {
            bail!(
                "insert position {at} out of range 0..={}",
                self.rows.len()
            );
        }
        self.rows.insert(at, Row::fresh(self.columns.len()));
        Ok(())
    }

    /// Buffer a new cell value and mark the row Dirty. Nothing is written
    /// through until [`flush_row`].
    ///
    /// [`flush_row`]: TableModel::flush_row
    pub fn set_value(&mut self, row: usize, column: usize, value: Value) -> Result<()> {
        self.require_editable()?;
        if column >= self.columns.len() {
            bail!("column {column} out of range 0..{}", self.columns.len());
        }
        let len = self.rows.len();
        let Some(entry) = self.rows.get_mut(row) else {
            bail!("row {row} out of range 0..{len}");
        };
        if entry.state == RowState::DeletePending {
            return Err(Error::validation(format!(
                "row {row} is pending deletion and cannot be edited"
            )));
        }
        entry.values[column] = value;
        entry.state = RowState::Dirty;
        Ok(())
    }

    /// Write a Dirty row through to storage and return it to Clean.
    ///
    /// Loaded rows update by the surrogate key captured at load time, never
    /// by index; zero affected rows means the storage row vanished under us.
    /// New rows insert and capture their key from the engine. Engine
    /// constraint failures surface as validation errors.
    pub fn flush_row(&mut self, row: usize) -> Result<()> {
        let alias = self.require_editable()?;
        let len = self.rows.len();
        let Some(entry) = self.rows.get(row) else {
            bail!("row {row} out of range 0..{len}");
        };

        match entry.state {
            RowState::Clean => return Ok(()),
            RowState::DeletePending => {
                return Err(Error::validation(format!(
                    "row {row} is pending deletion and cannot be flushed"
                )))
            }
            RowState::Dirty => {}
        }

        match entry.rowid {
            Some(rowid) => {
                let stmt =
                    sql::update_by_rowid(&self.schema, &self.table, alias, &self.columns);
                let mut params = entry.values.clone();
                params.push(Value::Integer(rowid));

                let affected = self.conn.borrow_mut().exec(&stmt, &params)?.into_count()?;
                if affected == 0 {
                    return Err(Error::row_vanished(format!(
                        "table={}.{} {alias}={rowid}",
                        self.schema, self.table
                    )));
                }
                debug!(table = %self.table, rowid, "update");
            }
            None => {
                let stmt = sql::insert_row(&self.schema, &self.table, alias, &self.columns);
                let params = entry.values.clone();

                let returned = self.conn.borrow_mut().exec(&stmt, &params)?.into_rows()?;
                let rowid = returned
                    .values
                    .first()
                    .and_then(|row| row.first())
                    .and_then(Value::as_integer)
                    .ok_or_else(|| {
                        Error::invalid_result("insert did not return a surrogate key")
                    })?;

                self.rows[row].rowid = Some(rowid);
                debug!(table = %self.table, rowid, "insert");
            }
        }

        self.rows[row].state = RowState::Clean;
        Ok(())
    }

    /// Delete `count` rows starting at `start`.
    ///
    /// While a transaction scope is open, rows transition to DeletePending:
    /// still addressable by index, suppressed from renderings that exclude
    /// pending deletions, and actually deleted at commit. With no scope
    /// open, each delete executes against storage immediately and the row
    /// leaves the sequence. Never-flushed new rows are simply dropped in
    /// both cases; they have no storage identity to defer.
    pub fn remove_rows(&mut self, start: usize, count: usize) -> Result<()> {
        self.require_editable()?;
        if count == 0 {
            return Ok(());
        }
        let end = start
            .checked_add(count)
            .filter(|&end| end <= self.rows.len())
            .ok_or_else(|| {
                litegrid_core::err!(
                    "rows {start}..{} out of range 0..{}",
                    start + count,
                    self.rows.len()
                )
            })?;

        if self.scope.is_active() {
            for entry in &mut self.rows[start..end] {
                if entry.rowid.is_some() {
                    entry.state = RowState::DeletePending;
                }
            }
            // Fresh rows have nothing in storage; drop them outright.
            let mut index = start;
            self.rows.retain(|entry| {
                let inside = {
                    let i = index;
                    index += 1;
                    i >= start && i < end
                };
                !(inside && entry.rowid.is_none())
            });
            return Ok(());
        }

        // No scope: execute immediately, back to front so indices hold.
        let alias = self.require_editable()?;
        for row in (start..end).rev() {
            if let Some(rowid) = self.rows[row].rowid {
                self.delete_from_storage(alias, rowid)?;
            }
            self.rows.remove(row);
        }
        Ok(())
    }

    fn delete_from_storage(&self, alias: &str, rowid: i64) -> Result<()> {
        let stmt = sql::delete_by_rowid(&self.schema, &self.table, alias);

        let affected = self
            .conn
            .borrow_mut()
            .exec(&stmt, &[Value::Integer(rowid)])?
            .into_count()?;
        if affected == 0 {
            return Err(Error::row_vanished(format!(
                "table={}.{} {alias}={rowid}",
                self.schema, self.table
            )));
        }
        debug!(table = %self.table, rowid, "delete");
        Ok(())
    }

    /// Open a transaction scope on the connection. This model becomes the
    /// scope's owner; deletes are deferred until [`commit`] or undone by
    /// [`rollback`].
    ///
    /// [`commit`]: TableModel::commit
    /// [`rollback`]: TableModel::rollback
    pub fn begin_transaction(&mut self) -> Result<()> {
        if self.scope.is_active() {
            bail!("a transaction scope is already open on this connection");
        }
        self.conn.borrow_mut().begin()?;
        self.scope.open(self.id);
        debug!(table = %self.table, "begin");
        Ok(())
    }

    /// Commit the open scope: execute every deferred delete exactly once,
    /// commit the engine transaction, then purge the deleted rows.
    ///
    /// A no-op when no scope is open, so invoking commit again issues no
    /// second delete statement.
    pub fn commit(&mut self) -> Result<()> {
        if !self.scope.is_active() {
            return Ok(());
        }
        if self.scope.owner() != Some(self.id) {
            bail!("transaction scope is owned by another model");
        }

        let pending: Vec<i64> = self
            .rows
            .iter()
            .filter(|entry| entry.state == RowState::DeletePending)
            .filter_map(|entry| entry.rowid)
            .collect();
        if !pending.is_empty() {
            let alias = self.require_editable()?;
            for rowid in &pending {
                self.delete_from_storage(alias, *rowid)?;
            }
        }

        self.conn.borrow_mut().commit()?;
        self.rows.retain(|entry| entry.state != RowState::DeletePending);
        self.scope.close(self.id);
        debug!(table = %self.table, deleted = pending.len(), "commit");
        Ok(())
    }

    /// Roll back the open scope. The deferred deletes were never applied, so
    /// no storage action is needed for them; storage is the source of truth
    /// afterwards, so the visible rows are re-read, which both restores
    /// DeletePending rows to Clean and discards Dirty unflushed edits.
    pub fn rollback(&mut self) -> Result<()> {
        if !self.scope.is_active() {
            return Ok(());
        }
        if self.scope.owner() != Some(self.id) {
            bail!("transaction scope is owned by another model");
        }

        self.conn.borrow_mut().rollback()?;
        self.scope.close(self.id);
        debug!(table = %self.table, "rollback");
        self.select()
    }
}
