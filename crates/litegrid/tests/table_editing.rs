use litegrid::{Connection, RowState, TableModel, TransactionScope, Value};
use litegrid_driver_sqlite::{Sqlite, SqliteConnection};
use pretty_assertions::assert_eq;
use std::{cell::RefCell, rc::Rc};

type Conn = Rc<RefCell<SqliteConnection>>;

fn connect() -> Conn {
    let conn = Sqlite::in_memory().connect().unwrap();
    Rc::new(RefCell::new(conn))
}

fn exec(conn: &Conn, sql: &str) {
    conn.borrow_mut().exec(sql, &[]).unwrap();
}

fn orders_fixture() -> Conn {
    let conn = connect();
    exec(&conn, "CREATE TABLE orders (id INTEGER, status TEXT)");
    exec(&conn, "INSERT INTO orders (id, status) VALUES (1, 'open')");
    exec(&conn, "INSERT INTO orders (id, status) VALUES (2, 'closed')");
    conn
}

fn open_model(conn: &Conn, scope: &TransactionScope) -> TableModel<SqliteConnection> {
    TableModel::open(conn.clone(), scope.clone(), "main", "orders").unwrap()
}

/// Full value grid, for comparing visible state across refreshes.
fn grid(model: &TableModel<SqliteConnection>) -> Vec<Vec<Value>> {
    (0..model.row_count())
        .map(|row| {
            (0..model.column_count())
                .map(|col| model.value(row, col).unwrap().clone())
                .collect()
        })
        .collect()
}

#[test]
fn select_loads_committed_rows() {
    let conn = orders_fixture();
    let model = open_model(&conn, &TransactionScope::new());

    assert!(model.is_editable());
    assert_eq!(model.rowid_alias(), Some("rowid"));
    assert_eq!(model.row_count(), 2);
    assert_eq!(model.column_count(), 2);
    assert_eq!(model.value(0, 1), Some(&Value::Text("open".into())));
    assert_eq!(model.row_state(0), Some(RowState::Clean));
    assert_eq!(model.value(2, 0), None);
    assert_eq!(model.row_state(2), None);
}

#[test]
fn open_missing_table_fails() {
    let conn = connect();
    let err = TableModel::open(conn, TransactionScope::new(), "main", "nothing").unwrap_err();
    assert!(err.to_string().contains("no such table"), "err={err}");
}

#[test]
fn edit_is_buffered_until_flush() {
    let conn = orders_fixture();
    let mut model = open_model(&conn, &TransactionScope::new());

    model.set_value(0, 1, Value::from("shipped")).unwrap();
    assert_eq!(model.row_state(0), Some(RowState::Dirty));

    // Not written through yet
    let fresh = open_model(&conn, &TransactionScope::new());
    assert_eq!(fresh.value(0, 1), Some(&Value::Text("open".into())));

    model.flush_row(0).unwrap();
    assert_eq!(model.row_state(0), Some(RowState::Clean));

    let fresh = open_model(&conn, &TransactionScope::new());
    assert_eq!(fresh.value(0, 1), Some(&Value::Text("shipped".into())));
}

#[test]
fn flush_of_clean_row_is_a_no_op() {
    let conn = orders_fixture();
    let mut model = open_model(&conn, &TransactionScope::new());
    model.flush_row(0).unwrap();
    assert_eq!(model.row_state(0), Some(RowState::Clean));
}

#[test]
fn insert_row_then_flush_assigns_identity() {
    let conn = orders_fixture();
    let mut model = open_model(&conn, &TransactionScope::new());

    model.insert_row(2).unwrap();
    assert_eq!(model.row_count(), 3);
    assert_eq!(model.row_state(2), Some(RowState::Dirty));
    assert_eq!(model.value(2, 0), Some(&Value::Null));

    model.set_value(2, 0, Value::Integer(3)).unwrap();
    model.set_value(2, 1, Value::from("new")).unwrap();
    model.flush_row(2).unwrap();
    assert_eq!(model.row_state(2), Some(RowState::Clean));

    // The flushed row is now addressable by identity: editing it again
    // updates in place instead of inserting a second row.
    model.set_value(2, 1, Value::from("newer")).unwrap();
    model.flush_row(2).unwrap();

    let fresh = open_model(&conn, &TransactionScope::new());
    assert_eq!(fresh.row_count(), 3);
    assert_eq!(fresh.value(2, 1), Some(&Value::Text("newer".into())));
}

#[test]
fn insert_position_is_bounded() {
    let conn = orders_fixture();
    let mut model = open_model(&conn, &TransactionScope::new());
    assert!(model.insert_row(3).is_err());
    model.insert_row(0).unwrap();
    assert_eq!(model.row_state(0), Some(RowState::Dirty));
}

#[test]
fn remove_without_scope_deletes_immediately() {
    let conn = orders_fixture();
    let mut model = open_model(&conn, &TransactionScope::new());

    model.remove_rows(1, 1).unwrap();
    assert_eq!(model.row_count(), 1);
    // No DeletePending state is ever observable on the immediate path
    assert_eq!(model.row_state(0), Some(RowState::Clean));

    let fresh = open_model(&conn, &TransactionScope::new());
    assert_eq!(fresh.row_count(), 1);
    assert_eq!(fresh.value(0, 1), Some(&Value::Text("open".into())));
}

#[test]
fn remove_range_is_bounded() {
    let conn = orders_fixture();
    let mut model = open_model(&conn, &TransactionScope::new());
    assert!(model.remove_rows(1, 2).is_err());
    assert_eq!(model.row_count(), 2);
    model.remove_rows(2, 0).unwrap();
}

#[test]
fn remove_inside_scope_defers_until_commit() {
    let conn = orders_fixture();
    let scope = TransactionScope::new();
    let mut model = open_model(&conn, &scope);

    model.begin_transaction().unwrap();
    model.remove_rows(0, 1).unwrap();

    // Still addressable by index, flagged for display
    assert_eq!(model.row_count(), 2);
    assert!(model.is_deleted(0));
    assert_eq!(model.row_state(1), Some(RowState::Clean));

    model.commit().unwrap();
    assert_eq!(model.row_count(), 1);
    assert!(!scope.is_active());

    let fresh = open_model(&conn, &TransactionScope::new());
    assert_eq!(fresh.row_count(), 1);
    assert_eq!(fresh.value(0, 1), Some(&Value::Text("closed".into())));

    // Second commit: empty pending set, no second delete, no error
    model.commit().unwrap();
    assert_eq!(model.row_count(), 1);
}

#[test]
fn rollback_restores_pre_scope_sequence() {
    let conn = orders_fixture();
    let scope = TransactionScope::new();
    let mut model = open_model(&conn, &scope);
    let before = grid(&model);

    model.begin_transaction().unwrap();
    model.set_value(0, 1, Value::from("mangled")).unwrap();
    model.remove_rows(1, 1).unwrap();
    model.insert_row(2).unwrap();
    assert!(model.is_deleted(1));

    model.rollback().unwrap();
    assert!(!scope.is_active());
    assert_eq!(grid(&model), before);
    for row in 0..model.row_count() {
        assert_eq!(model.row_state(row), Some(RowState::Clean));
    }

    // Equal to a fresh refresh from storage
    let fresh = open_model(&conn, &TransactionScope::new());
    assert_eq!(grid(&model), grid(&fresh));
}

#[test]
fn rollback_reverts_flushed_edits_inside_scope() {
    let conn = orders_fixture();
    let scope = TransactionScope::new();
    let mut model = open_model(&conn, &scope);

    model.begin_transaction().unwrap();
    model.set_value(0, 1, Value::from("tentative")).unwrap();
    model.flush_row(0).unwrap();
    model.rollback().unwrap();

    assert_eq!(model.value(0, 1), Some(&Value::Text("open".into())));
}

#[test]
fn scope_is_shared_across_models_on_one_connection() {
    let conn = orders_fixture();
    let scope = TransactionScope::new();
    let mut owner = open_model(&conn, &scope);
    let mut other = open_model(&conn, &scope);

    owner.begin_transaction().unwrap();

    // The non-owner observes the open scope: its deletes defer too
    other.remove_rows(0, 1).unwrap();
    assert!(other.is_deleted(0));
    assert_eq!(other.row_count(), 2);

    // ...but may not close a scope it does not own
    assert!(other.commit().is_err());
    assert!(other.rollback().is_err());
    assert!(scope.is_active());

    owner.rollback().unwrap();
    assert!(!scope.is_active());

    other.select().unwrap();
    assert_eq!(other.row_count(), 2);
    assert_eq!(other.row_state(0), Some(RowState::Clean));
}

#[test]
fn only_one_scope_per_connection() {
    let conn = orders_fixture();
    let scope = TransactionScope::new();
    let mut a = open_model(&conn, &scope);
    let mut b = open_model(&conn, &scope);

    a.begin_transaction().unwrap();
    assert!(b.begin_transaction().is_err());
    a.rollback().unwrap();
}

#[test]
fn editing_a_delete_pending_row_is_rejected() {
    let conn = orders_fixture();
    let scope = TransactionScope::new();
    let mut model = open_model(&conn, &scope);

    model.begin_transaction().unwrap();
    model.remove_rows(0, 1).unwrap();

    let err = model.set_value(0, 1, Value::from("zombie")).unwrap_err();
    assert!(err.is_validation(), "err={err}");
    model.rollback().unwrap();
}

#[test]
fn fresh_rows_are_dropped_not_deferred() {
    let conn = orders_fixture();
    let scope = TransactionScope::new();
    let mut model = open_model(&conn, &scope);

    model.begin_transaction().unwrap();
    model.insert_row(0).unwrap();
    // The new row was never flushed; there is nothing in storage to defer
    model.remove_rows(0, 1).unwrap();
    assert_eq!(model.row_count(), 2);
    assert_eq!(model.row_state(0), Some(RowState::Clean));
    model.rollback().unwrap();
}

#[test]
fn vanished_row_is_reported_distinctly() {
    let conn = orders_fixture();
    let mut model = open_model(&conn, &TransactionScope::new());

    // Concurrent external mutation: the row disappears under the model
    exec(&conn, "DELETE FROM orders WHERE id = 1");

    model.set_value(0, 1, Value::from("stale")).unwrap();
    let err = model.flush_row(0).unwrap_err();
    assert!(err.is_row_vanished(), "err={err}");
    assert!(!err.is_validation());

    // The model remains usable; a refresh resolves the conflict
    model.select().unwrap();
    assert_eq!(model.row_count(), 1);
}

#[test]
fn engine_constraint_failure_surfaces_as_validation() {
    let conn = connect();
    exec(&conn, "CREATE TABLE orders (id INTEGER, status TEXT UNIQUE)");
    exec(&conn, "INSERT INTO orders (id, status) VALUES (1, 'open')");
    exec(&conn, "INSERT INTO orders (id, status) VALUES (2, 'closed')");
    let mut model = open_model(&conn, &TransactionScope::new());

    model.set_value(1, 1, Value::from("open")).unwrap();
    let err = model.flush_row(1).unwrap_err();
    assert!(err.is_validation(), "err={err}");

    // Fail-closed: storage still holds the original value
    let fresh = open_model(&conn, &TransactionScope::new());
    assert_eq!(fresh.value(1, 1), Some(&Value::Text("closed".into())));
}

#[test]
fn fully_shadowed_table_is_read_only() {
    let conn = connect();
    exec(
        &conn,
        "CREATE TABLE orders (\"rowid\" TEXT, \"_rowid_\" TEXT, \"oid\" TEXT)",
    );
    exec(
        &conn,
        "INSERT INTO orders VALUES ('a', 'b', 'c')",
    );
    let mut model = open_model(&conn, &TransactionScope::new());

    // Rows are still viewable
    assert!(!model.is_editable());
    assert_eq!(model.rowid_alias(), None);
    assert_eq!(model.row_count(), 1);
    assert_eq!(model.value(0, 0), Some(&Value::Text("a".into())));

    // Every mutating operation reports the capability up front
    assert!(model.insert_row(0).unwrap_err().is_capability());
    assert!(model.remove_rows(0, 1).unwrap_err().is_capability());
    assert!(model
        .set_value(0, 0, Value::from("x"))
        .unwrap_err()
        .is_capability());
    assert_eq!(model.row_count(), 1);
}

#[test]
fn partially_shadowed_table_falls_back() {
    let conn = connect();
    exec(&conn, "CREATE TABLE orders (\"rowid\" TEXT, status TEXT)");
    exec(&conn, "INSERT INTO orders VALUES ('shadow', 'open')");
    let mut model = open_model(&conn, &TransactionScope::new());

    assert_eq!(model.rowid_alias(), Some("_rowid_"));
    model.set_value(0, 1, Value::from("closed")).unwrap();
    model.flush_row(0).unwrap();

    let fresh = open_model(&conn, &TransactionScope::new());
    assert_eq!(fresh.value(0, 1), Some(&Value::Text("closed".into())));
}
