use std::fmt::{Debug, Display};
use std::sync::Arc;

use crate::document::Document;
use crate::serializer::{serialize, DocumentBuilder};

use super::{and_of, list_of, or_of, BooleanExpr, ExpressionList};

/// A node of a filter expression.
///
/// Every node knows how to append itself to a [DocumentBuilder] without any
/// outside context. Nodes are immutable values; combining two expressions
/// builds a new parent node that owns both.
pub trait Expression: Display + Send + Sync {
    /// Appends this expression's key/value pairs to `builder`.
    fn append_to(&self, builder: &mut DocumentBuilder);

    /// Serializes this expression into a fresh filter document.
    fn to_document(&self) -> Document {
        serialize(self)
    }

    /// `self AND other`, serialized as `{"$and": [self, other]}`.
    fn and<R: Expression>(self, other: R) -> BooleanExpr<Self, R>
    where
        Self: Sized,
    {
        and_of(self, other)
    }

    /// `self OR other`, serialized as `{"$or": [self, other]}`.
    fn or<R: Expression>(self, other: R) -> BooleanExpr<Self, R>
    where
        Self: Sized,
    {
        or_of(self, other)
    }

    /// Lists `other` after `self`; both land as sibling keys of one document.
    fn also<R: Expression>(self, other: R) -> ExpressionList<Self, R>
    where
        Self: Sized,
    {
        list_of(self, other)
    }

    /// Erases the concrete node type.
    fn into_query(self) -> Query
    where
        Self: Sized + 'static,
    {
        Query::new(self)
    }
}

/// A shared, type-erased filter expression.
///
/// `Query` is what callers hand to an executor when the concrete node type
/// does not matter, and what the n-ary builders [all_of](super::all_of) and
/// [any_of](super::any_of) produce. Cloning is cheap.
#[derive(Clone)]
pub struct Query {
    inner: Arc<dyn Expression>,
}

impl Query {
    pub fn new<E: Expression + 'static>(expression: E) -> Self {
        Query {
            inner: Arc::new(expression),
        }
    }
}

impl Expression for Query {
    #[inline]
    fn append_to(&self, builder: &mut DocumentBuilder) {
        self.inner.append_to(builder)
    }

    fn into_query(self) -> Query {
        self
    }
}

impl Display for Query {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl Debug for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Query({})", self.inner)
    }
}

impl From<Query> for Document {
    fn from(query: Query) -> Self {
        query.to_document()
    }
}
