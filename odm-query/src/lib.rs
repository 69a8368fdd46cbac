//! # odm_query - Typed Filter Expressions
//!
//! odm_query builds MongoDB-style filter documents from typed references to
//! the fields of plain Rust structs. A field can only be queried after it has
//! been registered on its type, and a value can only be compared with a field
//! of a compatible type. Both mistakes are caught before a document is built.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use odm_query::{key, mapped_fields, Expression};
//!
//! struct Bar {
//!     w: i64,
//!     x1: i32,
//!     z: String,
//! }
//!
//! mapped_fields!(Bar { w, x1, z });
//!
//! # fn main() -> odm_query::errors::QueryResult<()> {
//! let w = key!(Bar::w)?;
//! let z = key!(Bar::z)?;
//!
//! // {"w": {"$gte": 444}, "z": {"$not": {"$eq": "bye"}}}
//! let filter = w.gte(444).also(!z.eq("bye"));
//! println!("{}", filter.to_document());
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`common`] - Values, operator keywords and operand typing rules
//! - [`document`] - The ordered filter document
//! - [`errors`] - Error types and result definitions
//! - [`expression`] - Expression nodes and combinators
//! - [`registry`] - Per-type field registries and field references
//! - [`serializer`] - Expression to document serialization

pub mod common;
pub mod document;
pub mod errors;
pub mod expression;
pub mod registry;
pub mod serializer;

pub use common::{FieldType, QueryValue, Value};
pub use document::Document;
pub use errors::{ErrorKind, QueryError, QueryResult};
pub use expression::{
    all_of, and_of, any_of, compare, list_of, negate, or_of, Expression, Query,
};
pub use registry::{FieldAccessor, FieldRef, FieldRegistry, Mapped};
pub use serializer::serialize;
