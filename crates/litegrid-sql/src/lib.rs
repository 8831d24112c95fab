#[macro_use]
mod fmt;
use fmt::{Formatter, ToSql};

mod delim;
use delim::{Comma, Period};

pub mod ident;
use ident::Ident;

pub mod literal;

mod query;
pub use query::{Collation, Direction, FilterOp, FilterTerm, LogicOp, OrderTerm, QuerySpec};

mod rowid;
pub use rowid::{rowid_alias, ROWID_CANDIDATES};

mod table_stmt;
pub use table_stmt::{delete_by_rowid, insert_row, select_rows, update_by_rowid};
