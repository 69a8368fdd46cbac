//! Filter expressions and their combinators.
//!
//! Expressions are built from typed field references and combined into
//! immutable trees. Serializing a tree gives a MongoDB-style filter document.
//!
//! # Building Expressions
//!
//! - `x.eq(5)`, `x.gt(5)`, `x.is_in([1, 2])` - single-field predicates
//! - `negate(x.lt(10))` or `!x.lt(10)` - `{x: {$not: {$lt: 10}}}`
//! - `and_of(a, b)`, `a.and(b)` or `a & b` - `{$and: [a, b]}`
//! - `or_of(a, b)`, `a.or(b)` or `a | b` - `{$or: [a, b]}`
//! - `list_of(a, b)` or `a.also(b)` - the keys of `a` then `b` in one document
//! - `all_of(items)`, `any_of(items)` - n-ary forms returning a [Query]
//!
//! # Examples
//!
//! ```rust,ignore
//! use odm_query::expression::*;
//! use odm_query::{key, mapped_fields};
//!
//! struct Point { x: i32, y: i32 }
//! mapped_fields!(Point { x, y });
//!
//! let x = key!(Point::x)?;
//! let y = key!(Point::y)?;
//!
//! // {"$and": [{"x": {"$eq": 5}}, {"y": {"$gt": 6}}]}
//! let filter = x.eq(5) & y.gt(6);
//! let document = filter.to_document();
//! ```

mod comparison;
#[allow(clippy::module_inception)]
mod expression;
mod logical;

pub use comparison::*;
pub use expression::*;
pub use logical::*;
