//! Row-level statements issued by the editable record model.
//!
//! Identifiers are quoted into the statement text; cell values never are.
//! They bind to numbered `?N` placeholders so the engine sees them as
//! parameters.

use super::{Comma, Formatter, Ident, Period, ToSql};

use litegrid_core::schema::Column;

/// `SELECT "<alias>", <columns> FROM "<schema>"."<table>"`, or the column
/// list alone when `alias` is `None` (table without a usable surrogate key).
pub fn select_rows(schema: &str, table: &str, alias: Option<&str>, columns: &[Column]) -> String {
    let mut ret = String::new();
    let f = &mut Formatter { dst: &mut ret };

    fmt!(f, "SELECT ");
    if let Some(alias) = alias {
        Ident(alias).to_sql(f);
        fmt!(f, ", ");
    }
    Comma(columns.iter().map(|c| Ident(&c.name))).to_sql(f);
    fmt!(f, " FROM ");
    Period([schema, table].map(Ident)).to_sql(f);
    ret.push(';');
    ret
}

/// `UPDATE ... SET "c1" = ?1, ... WHERE "<alias>" = ?N` with one placeholder
/// per column and the surrogate key bound last.
pub fn update_by_rowid(schema: &str, table: &str, alias: &str, columns: &[Column]) -> String {
    let mut ret = String::new();
    let f = &mut Formatter { dst: &mut ret };

    fmt!(f, "UPDATE ");
    Period([schema, table].map(Ident)).to_sql(f);
    fmt!(f, " SET ");
    let mut s = "";
    for (i, column) in columns.iter().enumerate() {
        fmt!(f, s);
        Ident(&column.name).to_sql(f);
        f.dst.push_str(&format!(" = ?{}", i + 1));
        s = ", ";
    }
    fmt!(f, " WHERE ");
    Ident(alias).to_sql(f);
    f.dst.push_str(&format!(" = ?{};", columns.len() + 1));
    ret
}

/// `DELETE FROM ... WHERE "<alias>" = ?1`
pub fn delete_by_rowid(schema: &str, table: &str, alias: &str) -> String {
    let mut ret = String::new();
    let f = &mut Formatter { dst: &mut ret };

    fmt!(f, "DELETE FROM ");
    Period([schema, table].map(Ident)).to_sql(f);
    fmt!(f, " WHERE ");
    Ident(alias).to_sql(f);
    fmt!(f, " = ?1;");
    ret
}

/// `INSERT INTO ... ("c1", ...) VALUES (?1, ...) RETURNING "<alias>"`
///
/// The RETURNING clause hands back the new row's surrogate key so the model
/// can address the row without re-querying.
pub fn insert_row(schema: &str, table: &str, alias: &str, columns: &[Column]) -> String {
    let mut ret = String::new();
    let f = &mut Formatter { dst: &mut ret };

    fmt!(f, "INSERT INTO ");
    Period([schema, table].map(Ident)).to_sql(f);
    fmt!(f, " (");
    Comma(columns.iter().map(|c| Ident(&c.name))).to_sql(f);
    fmt!(f, ") VALUES (");
    let mut s = "";
    for i in 0..columns.len() {
        fmt!(f, s);
        f.dst.push_str(&format!("?{}", i + 1));
        s = ", ";
    }
    fmt!(f, ") RETURNING ");
    Ident(alias).to_sql(f);
    ret.push(';');
    ret
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn column(name: &str) -> Column {
        Column {
            name: name.into(),
            ty: "TEXT".into(),
            nullable: true,
            primary_key: false,
        }
    }

    #[test]
    fn select_includes_alias_first() {
        let columns = [column("id"), column("status")];
        assert_eq!(
            select_rows("main", "orders", Some("rowid"), &columns),
            "SELECT \"rowid\", \"id\", \"status\" FROM \"main\".\"orders\";"
        );
    }

    #[test]
    fn select_without_alias() {
        let columns = [column("id")];
        assert_eq!(
            select_rows("main", "orders", None, &columns),
            "SELECT \"id\" FROM \"main\".\"orders\";"
        );
    }

    #[test]
    fn update_binds_rowid_last() {
        let columns = [column("id"), column("status")];
        assert_eq!(
            update_by_rowid("main", "orders", "rowid", &columns),
            "UPDATE \"main\".\"orders\" SET \"id\" = ?1, \"status\" = ?2 WHERE \"rowid\" = ?3;"
        );
    }

    #[test]
    fn delete_by_alias() {
        assert_eq!(
            delete_by_rowid("main", "orders", "_rowid_"),
            "DELETE FROM \"main\".\"orders\" WHERE \"_rowid_\" = ?1;"
        );
    }

    #[test]
    fn insert_returns_surrogate_key() {
        let columns = [column("id"), column("status")];
        assert_eq!(
            insert_row("main", "orders", "rowid", &columns),
            "INSERT INTO \"main\".\"orders\" (\"id\", \"status\") VALUES (?1, ?2) RETURNING \"rowid\";"
        );
    }
}
