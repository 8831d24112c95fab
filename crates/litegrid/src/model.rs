mod query;
pub use query::QueryModel;

mod row;
pub use row::RowState;
use row::Row;

mod scope;
pub use scope::TransactionScope;

mod table;
pub use table::TableModel;
