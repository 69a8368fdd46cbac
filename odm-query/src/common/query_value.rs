use super::Value;
use crate::document::Document;

/// The "value is appendable" capability.
///
/// Anything used as a field type or as a comparison operand must be able to
/// append itself to a filter document as a [Value].
pub trait QueryValue: Clone + Send + Sync + 'static {
    fn to_value(&self) -> Value;
}

/// A type that can be declared as a queryable field.
///
/// Supported field types are `bool`, `i8`, `i16`, `i32`, `i64`, `u8`,
/// `u16`, `u32`, `f32`, `f64`, `char`, `String`, [Value], [Document], and
/// `Option` / `Vec` of those. `u64`, `usize` and `i128` are not supported:
/// their values do not all fit in a 64-bit signed filter integer. Such
/// members can still be registered, but cannot be compared:
///
/// ```compile_fail
/// use odm_query::{key, mapped_fields};
///
/// struct Counter { hits: u64 }
/// mapped_fields!(Counter { hits });
///
/// let _ = key!(Counter::hits).unwrap().gt(10u64);
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be compared in a filter expression",
    note = "supported field types are bool, i8, i16, i32, i64, u8, u16, u32, f32, f64, char, String, Value, Document, and Option or Vec of those"
)]
pub trait FieldType: QueryValue {}

/// A value accepted as an operand for a field of type `T`.
///
/// Every field type accepts itself. Beyond that, only lossless conversions
/// within the same family are accepted: narrower integers for integer
/// fields, `f32` for `f64` fields, `&str` and `char` for `String` fields.
/// `bool` is in no family, so a boolean never reaches a numeric field and a
/// number never reaches a boolean one.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be compared with a field of type `{T}`",
    label = "not an operand of `{T}`"
)]
pub trait Operand<T> {
    fn into_operand(self) -> T;
}

impl<T: FieldType> Operand<T> for T {
    #[inline]
    fn into_operand(self) -> T {
        self
    }
}

/// A bare value compared with an optional field.
impl<T: FieldType> Operand<Option<T>> for T {
    #[inline]
    fn into_operand(self) -> Option<T> {
        Some(self)
    }
}

macro_rules! operand_table {
    ($($field:ty => [$($operand:ty),*]);+ $(;)?) => {
        $($(
            impl Operand<$field> for $operand {
                #[inline]
                fn into_operand(self) -> $field {
                    self.into()
                }
            }
        )*)+
    };
}

operand_table! {
    i16 => [i8, u8];
    i32 => [i8, i16, u8, u16];
    i64 => [i8, i16, i32, u8, u16, u32];
    u16 => [u8];
    u32 => [u8, u16];
    f64 => [f32];
    String => [&str, char];
    Value => [bool, i32, i64, f64, &str, String];
}

impl QueryValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FieldType for bool {}

macro_rules! field_type {
    ($($t:ty),+) => {
        $(
            impl QueryValue for $t {
                fn to_value(&self) -> Value {
                    Value::from(self.clone())
                }
            }

            impl FieldType for $t {}
        )+
    };
}

field_type!(i8, i16, i32, i64, u8, u16, u32, f32, f64, char, String, Document);

impl QueryValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl FieldType for Value {}

impl<T: QueryValue> QueryValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: FieldType> FieldType for Option<T> {}

impl<T: QueryValue> QueryValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(QueryValue::to_value).collect())
    }
}

impl<T: FieldType> FieldType for Vec<T> {}
