use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::common::{
    FieldType, Operand, QueryValue, Value, EQ_OPERATOR, GTE_OPERATOR, GT_OPERATOR, IN_OPERATOR,
    LTE_OPERATOR, LT_OPERATOR, NE_OPERATOR, NIN_OPERATOR,
};
use crate::document::Document;
use crate::registry::FieldRef;
use crate::serializer::DocumentBuilder;

use super::Expression;

/// An expression that tests exactly one field.
///
/// Only field predicates can be negated: `$not` nests under a field name.
pub trait FieldPredicate: Expression {
    /// The registered name of the tested field.
    fn field_name(&self) -> &'static str;

    /// The operator document nested under the field name, e.g. `{"$gt": 5}`.
    fn operator_document(&self) -> Document;
}

/// The six comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
    Ne,
}

impl ComparisonOp {
    pub const ALL: [ComparisonOp; 6] = [
        ComparisonOp::Eq,
        ComparisonOp::Gt,
        ComparisonOp::Gte,
        ComparisonOp::Lt,
        ComparisonOp::Lte,
        ComparisonOp::Ne,
    ];

    /// The operator keyword in a filter document.
    pub fn keyword(&self) -> &'static str {
        match self {
            ComparisonOp::Eq => EQ_OPERATOR,
            ComparisonOp::Gt => GT_OPERATOR,
            ComparisonOp::Gte => GTE_OPERATOR,
            ComparisonOp::Lt => LT_OPERATOR,
            ComparisonOp::Lte => LTE_OPERATOR,
            ComparisonOp::Ne => NE_OPERATOR,
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            ComparisonOp::Eq => "==",
            ComparisonOp::Gt => ">",
            ComparisonOp::Gte => ">=",
            ComparisonOp::Lt => "<",
            ComparisonOp::Lte => "<=",
            ComparisonOp::Ne => "!=",
        }
    }
}

/// Compares one field with a value: `{field: {op: value}}`.
#[derive(Debug, Clone)]
pub struct Comparison<T> {
    field: &'static str,
    op: ComparisonOp,
    value: T,
}

impl<T: QueryValue> Comparison<T> {
    pub fn op(&self) -> ComparisonOp {
        self.op
    }

    pub fn value(&self) -> &T {
        &self.value
    }
}

impl<T: QueryValue> FieldPredicate for Comparison<T> {
    fn field_name(&self) -> &'static str {
        self.field
    }

    fn operator_document(&self) -> Document {
        let mut operators = Document::new();
        operators.put(self.op.keyword(), self.value.to_value());
        operators
    }
}

impl<T: QueryValue> Expression for Comparison<T> {
    fn append_to(&self, builder: &mut DocumentBuilder) {
        builder.append_predicate(self.field, self.operator_document());
    }
}

impl<T: QueryValue> Display for Comparison<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({} {} {})",
            self.field,
            self.op.symbol(),
            self.value.to_value()
        )
    }
}

/// The two membership operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MembershipOp {
    In,
    Nin,
}

impl MembershipOp {
    pub fn keyword(&self) -> &'static str {
        match self {
            MembershipOp::In => IN_OPERATOR,
            MembershipOp::Nin => NIN_OPERATOR,
        }
    }
}

/// Tests one field against a list of values: `{field: {"$in": [...]}}`.
#[derive(Debug, Clone)]
pub struct Membership<T> {
    field: &'static str,
    op: MembershipOp,
    values: Vec<T>,
}

impl<T: QueryValue> Membership<T> {
    pub fn op(&self) -> MembershipOp {
        self.op
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }
}

impl<T: QueryValue> FieldPredicate for Membership<T> {
    fn field_name(&self) -> &'static str {
        self.field
    }

    fn operator_document(&self) -> Document {
        let mut operators = Document::new();
        operators.put(
            self.op.keyword(),
            Value::Array(self.values.iter().map(QueryValue::to_value).collect()),
        );
        operators
    }
}

impl<T: QueryValue> Expression for Membership<T> {
    fn append_to(&self, builder: &mut DocumentBuilder) {
        builder.append_predicate(self.field, self.operator_document());
    }
}

impl<T: QueryValue> Display for Membership<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let op = match self.op {
            MembershipOp::In => "in",
            MembershipOp::Nin => "not in",
        };
        write!(
            f,
            "({} {} [{}])",
            self.field,
            op,
            self.values.iter().map(QueryValue::to_value).join(", ")
        )
    }
}

/// Compares `field` with `value` using `op`.
///
/// `value` must be an [Operand] of the field's declared type: the type itself
/// or a lossless conversion from the same family. Booleans and numbers never
/// mix.
pub fn compare<O, T, U>(field: &FieldRef<O, T>, value: U, op: ComparisonOp) -> Comparison<T>
where
    T: FieldType,
    U: Operand<T>,
{
    Comparison {
        field: field.name(),
        op,
        value: value.into_operand(),
    }
}

fn membership<O, T, U, I>(field: &FieldRef<O, T>, values: I, op: MembershipOp) -> Membership<T>
where
    T: FieldType,
    U: Operand<T>,
    I: IntoIterator<Item = U>,
{
    Membership {
        field: field.name(),
        op,
        values: values
            .into_iter()
            .map(Operand::<T>::into_operand)
            .collect(),
    }
}

impl<O, T: FieldType> FieldRef<O, T> {
    /// `{field: {"$eq": value}}`
    pub fn eq<U: Operand<T>>(&self, value: U) -> Comparison<T> {
        compare(self, value, ComparisonOp::Eq)
    }

    /// `{field: {"$gt": value}}`
    pub fn gt<U: Operand<T>>(&self, value: U) -> Comparison<T> {
        compare(self, value, ComparisonOp::Gt)
    }

    /// `{field: {"$gte": value}}`
    pub fn gte<U: Operand<T>>(&self, value: U) -> Comparison<T> {
        compare(self, value, ComparisonOp::Gte)
    }

    /// `{field: {"$lt": value}}`
    pub fn lt<U: Operand<T>>(&self, value: U) -> Comparison<T> {
        compare(self, value, ComparisonOp::Lt)
    }

    /// `{field: {"$lte": value}}`
    pub fn lte<U: Operand<T>>(&self, value: U) -> Comparison<T> {
        compare(self, value, ComparisonOp::Lte)
    }

    /// `{field: {"$ne": value}}`
    pub fn ne<U: Operand<T>>(&self, value: U) -> Comparison<T> {
        compare(self, value, ComparisonOp::Ne)
    }

    /// `{field: {"$in": [values...]}}`
    pub fn is_in<U, I>(&self, values: I) -> Membership<T>
    where
        U: Operand<T>,
        I: IntoIterator<Item = U>,
    {
        membership(self, values, MembershipOp::In)
    }

    /// `{field: {"$nin": [values...]}}`
    pub fn not_in<U, I>(&self, values: I) -> Membership<T>
    where
        U: Operand<T>,
        I: IntoIterator<Item = U>,
    {
        membership(self, values, MembershipOp::Nin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{doc, key};

    struct Bar {
        w: i64,
        x1: i32,
        y: bool,
        z: String,
        score: f64,
        nickname: Option<String>,
    }

    crate::mapped_fields!(Bar { w, x1, y, z, score, nickname });

    #[test]
    fn eq_serializes_field_and_operator() {
        let x1 = key!(Bar::x1).unwrap();
        assert_eq!(x1.eq(1).to_document(), doc! { "x1": { "$eq": 1 } });
    }

    #[test]
    fn every_operator_uses_its_keyword() {
        let x1 = key!(Bar::x1).unwrap();
        let expected = ["$eq", "$gt", "$gte", "$lt", "$lte", "$ne"];
        for (op, keyword) in ComparisonOp::ALL.iter().zip(expected) {
            assert_eq!(op.keyword(), keyword);
            let document = compare(&x1, 10, *op).to_document();
            let operators = document.get("x1").and_then(Value::as_document).unwrap();
            assert_eq!(operators.get(keyword), Some(&Value::I32(10)));
        }
    }

    #[test]
    fn named_methods_pick_operator() {
        let w = key!(Bar::w).unwrap();
        assert_eq!(w.eq(1).op(), ComparisonOp::Eq);
        assert_eq!(w.gt(1).op(), ComparisonOp::Gt);
        assert_eq!(w.gte(1).op(), ComparisonOp::Gte);
        assert_eq!(w.lt(1).op(), ComparisonOp::Lt);
        assert_eq!(w.lte(1).op(), ComparisonOp::Lte);
        assert_eq!(w.ne(1).op(), ComparisonOp::Ne);
    }

    #[test]
    fn operands_convert_into_field_type() {
        let w = key!(Bar::w).unwrap();
        let widened = w.gte(444i32);
        assert_eq!(*widened.value(), 444i64);
        assert_eq!(widened.to_document(), doc! { "w": { "$gte": (444i64) } });

        let z = key!(Bar::z).unwrap();
        assert_eq!(z.eq("hello").value(), "hello");

        let score = key!(Bar::score).unwrap();
        assert_eq!(score.lt(2.5).to_document(), doc! { "score": { "$lt": 2.5 } });
    }

    #[test]
    fn operands_stay_within_their_family() {
        let w = key!(Bar::w).unwrap();
        assert_eq!(w.eq(7u32).to_document(), doc! { "w": { "$eq": (7i64) } });
        assert_eq!(w.is_in([1u8, 2u8]).values(), &[1i64, 2i64]);

        let z = key!(Bar::z).unwrap();
        assert_eq!(z.eq('q').to_document(), doc! { "z": { "$eq": "q" } });

        let nickname = key!(Bar::nickname).unwrap();
        assert_eq!(
            nickname.eq("bob".to_string()).to_document(),
            doc! { "nickname": { "$eq": "bob" } }
        );
    }

    #[test]
    fn boolean_field_compares_with_bool() {
        let y = key!(Bar::y).unwrap();
        assert_eq!(y.eq(false).to_document(), doc! { "y": { "$eq": false } });
        assert_eq!(y.ne(true).to_document(), doc! { "y": { "$ne": true } });
    }

    #[test]
    fn optional_field_accepts_value_and_none() {
        let nickname = key!(Bar::nickname).unwrap();
        assert_eq!(
            nickname.eq(Some("bob".to_string())).to_document(),
            doc! { "nickname": { "$eq": "bob" } }
        );
        assert_eq!(
            nickname.eq(None).to_document(),
            doc! { "nickname": { "$eq": (Value::Null) } }
        );
    }

    #[test]
    fn membership_serializes_array() {
        let x1 = key!(Bar::x1).unwrap();
        let within = x1.is_in([1, 2, 3]);
        assert_eq!(within.op(), MembershipOp::In);
        assert_eq!(within.values(), &[1, 2, 3]);
        assert_eq!(within.to_document(), doc! { "x1": { "$in": [1, 2, 3] } });

        let z = key!(Bar::z).unwrap();
        assert_eq!(
            z.not_in(vec!["a", "b"]).to_document(),
            doc! { "z": { "$nin": ["a", "b"] } }
        );
    }

    #[test]
    fn empty_membership_is_allowed() {
        let x1 = key!(Bar::x1).unwrap();
        let nothing: Vec<i32> = Vec::new();
        assert_eq!(
            x1.is_in(nothing).to_document(),
            doc! { "x1": { "$in": [] } }
        );
    }

    #[test]
    fn display_uses_operator_symbols() {
        let x1 = key!(Bar::x1).unwrap();
        let z = key!(Bar::z).unwrap();
        assert_eq!(x1.gt(5).to_string(), "(x1 > 5)");
        assert_eq!(x1.lte(5).to_string(), "(x1 <= 5)");
        assert_eq!(z.ne("a").to_string(), r#"(z != "a")"#);
        assert_eq!(x1.is_in([1, 2]).to_string(), "(x1 in [1, 2])");
        assert_eq!(x1.not_in([3]).to_string(), "(x1 not in [3])");
    }

    #[test]
    fn field_predicate_exposes_parts() {
        let x1 = key!(Bar::x1).unwrap();
        let cmp = x1.lt(3);
        assert_eq!(cmp.field_name(), "x1");
        assert_eq!(cmp.operator_document(), doc! { "$lt": 3 });
    }
}
