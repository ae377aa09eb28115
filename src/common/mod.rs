mod comparison;
mod error;
mod models;

pub use comparison::*;
pub use error::*;
pub use models::*;
