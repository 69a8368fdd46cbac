use std::fmt::{Display, Formatter};
use std::ops::{BitAnd, BitOr, Not};

use crate::common::{QueryValue, AND_OPERATOR, NOT_OPERATOR, OR_OPERATOR};
use crate::document::Document;
use crate::errors::{ErrorKind, QueryError, QueryResult};
use crate::serializer::DocumentBuilder;

use super::{Comparison, Expression, FieldPredicate, Membership, Query};

/// Negates one field predicate: `{field: {"$not": {op: value}}}`.
///
/// Lists and boolean combinations cannot be negated: `$not` only applies to
/// the operators of a single field.
#[derive(Debug, Clone)]
pub struct Negation<P> {
    inner: P,
}

impl<P: FieldPredicate> Negation<P> {
    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: FieldPredicate> Expression for Negation<P> {
    fn append_to(&self, builder: &mut DocumentBuilder) {
        let mut operators = Document::new();
        operators.put(NOT_OPERATOR, self.inner.operator_document());
        builder.append_predicate(self.inner.field_name(), operators);
    }
}

impl<P: FieldPredicate> Display for Negation<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "!{}", self.inner)
    }
}

/// Independent conditions listed one after another.
///
/// Head and tail are appended into the same document, head first, so the
/// list reads as an implicit AND. Building `a.also(b).also(c)` nests as
/// `((a, b), c)` and serializes the keys of `a`, `b`, `c` in that order.
#[derive(Debug, Clone)]
pub struct ExpressionList<H, T> {
    head: H,
    tail: T,
}

impl<H: Expression, T: Expression> Expression for ExpressionList<H, T> {
    fn append_to(&self, builder: &mut DocumentBuilder) {
        self.head.append_to(builder);
        self.tail.append_to(builder);
    }
}

impl<H: Expression, T: Expression> Display for ExpressionList<H, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.head, self.tail)
    }
}

/// The two boolean combinators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanOp {
    And,
    Or,
}

impl BooleanOp {
    pub fn keyword(&self) -> &'static str {
        match self {
            BooleanOp::And => AND_OPERATOR,
            BooleanOp::Or => OR_OPERATOR,
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            BooleanOp::And => "&&",
            BooleanOp::Or => "||",
        }
    }
}

/// Combines two expressions: `{"$and"|"$or": [left, right]}`.
///
/// Each side is serialized into its own document.
#[derive(Debug, Clone)]
pub struct BooleanExpr<L, R> {
    left: L,
    right: R,
    op: BooleanOp,
}

impl<L: Expression, R: Expression> BooleanExpr<L, R> {
    pub fn op(&self) -> BooleanOp {
        self.op
    }
}

impl<L: Expression, R: Expression> Expression for BooleanExpr<L, R> {
    fn append_to(&self, builder: &mut DocumentBuilder) {
        builder.append_combination(
            self.op.keyword(),
            vec![self.left.to_document(), self.right.to_document()],
        );
    }
}

impl<L: Expression, R: Expression> Display for BooleanExpr<L, R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.left, self.op.symbol(), self.right)
    }
}

/// Negates a single field predicate.
pub fn negate<P: FieldPredicate>(predicate: P) -> Negation<P> {
    Negation { inner: predicate }
}

/// `{"$and": [left, right]}`
pub fn and_of<L: Expression, R: Expression>(left: L, right: R) -> BooleanExpr<L, R> {
    BooleanExpr {
        left,
        right,
        op: BooleanOp::And,
    }
}

/// `{"$or": [left, right]}`
pub fn or_of<L: Expression, R: Expression>(left: L, right: R) -> BooleanExpr<L, R> {
    BooleanExpr {
        left,
        right,
        op: BooleanOp::Or,
    }
}

/// Lists `tail` after `head` in one document.
pub fn list_of<H: Expression, T: Expression>(head: H, tail: T) -> ExpressionList<H, T> {
    ExpressionList { head, tail }
}

/// Lists all `expressions` in one document, in iteration order.
///
/// Fails with [ErrorKind::InvalidOperation] when `expressions` is empty.
pub fn all_of<E, I>(expressions: I) -> QueryResult<Query>
where
    E: Expression + 'static,
    I: IntoIterator<Item = E>,
{
    fold(expressions, "all_of", |acc, next| list_of(acc, next).into_query())
}

/// Nests all `expressions` into binary `$or` pairs, left to right.
///
/// `any_of([a, b, c])` serializes as `{"$or": [{"$or": [a, b]}, c]}`.
/// Fails with [ErrorKind::InvalidOperation] when `expressions` is empty.
pub fn any_of<E, I>(expressions: I) -> QueryResult<Query>
where
    E: Expression + 'static,
    I: IntoIterator<Item = E>,
{
    fold(expressions, "any_of", |acc, next| or_of(acc, next).into_query())
}

fn fold<E, I, F>(expressions: I, name: &str, combine: F) -> QueryResult<Query>
where
    E: Expression + 'static,
    I: IntoIterator<Item = E>,
    F: Fn(Query, E) -> Query,
{
    let mut iter = expressions.into_iter();
    let first = match iter.next() {
        Some(first) => first.into_query(),
        None => {
            log::error!("{} called without any expression", name);
            return Err(QueryError::new(
                &format!("{} needs at least one expression", name),
                ErrorKind::InvalidOperation,
            ));
        }
    };
    Ok(iter.fold(first, combine))
}

macro_rules! combinators {
    ($ty:ident < $($param:ident),* > where $($bound:tt)*) => {
        impl<$($param,)* Rhs: Expression> BitAnd<Rhs> for $ty<$($param),*>
        where
            $($bound)*
        {
            type Output = BooleanExpr<Self, Rhs>;

            fn bitand(self, rhs: Rhs) -> Self::Output {
                and_of(self, rhs)
            }
        }

        impl<$($param,)* Rhs: Expression> BitOr<Rhs> for $ty<$($param),*>
        where
            $($bound)*
        {
            type Output = BooleanExpr<Self, Rhs>;

            fn bitor(self, rhs: Rhs) -> Self::Output {
                or_of(self, rhs)
            }
        }
    };
}

combinators!(Comparison<T> where T: QueryValue);
combinators!(Membership<T> where T: QueryValue);
combinators!(Negation<P> where P: FieldPredicate);
combinators!(ExpressionList<H, T> where H: Expression, T: Expression);
combinators!(BooleanExpr<L, R> where L: Expression, R: Expression);

impl<Rhs: Expression> BitAnd<Rhs> for Query {
    type Output = BooleanExpr<Self, Rhs>;

    fn bitand(self, rhs: Rhs) -> Self::Output {
        and_of(self, rhs)
    }
}

impl<Rhs: Expression> BitOr<Rhs> for Query {
    type Output = BooleanExpr<Self, Rhs>;

    fn bitor(self, rhs: Rhs) -> Self::Output {
        or_of(self, rhs)
    }
}

impl<T: QueryValue> Not for Comparison<T> {
    type Output = Negation<Self>;

    fn not(self) -> Self::Output {
        negate(self)
    }
}

impl<T: QueryValue> Not for Membership<T> {
    type Output = Negation<Self>;

    fn not(self) -> Self::Output {
        negate(self)
    }
}
