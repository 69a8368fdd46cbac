mod constants;
mod query_value;
mod type_utils;
mod value;

pub use constants::*;
pub use query_value::*;
pub use type_utils::*;
pub use value::*;
