mod model;
pub use model::{QueryModel, RowState, TableModel, TransactionScope};

pub use litegrid_core::{
    driver::{self, Connection, Response, Rows},
    schema, Error, Result, Value,
};
pub use litegrid_sql as sql;
