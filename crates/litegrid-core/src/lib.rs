mod error;
pub use error::{Error, IntoError};

pub mod driver;

pub mod schema;

mod value;
pub use value::Value;

pub type Result<T, E = Error> = std::result::Result<T, E>;
