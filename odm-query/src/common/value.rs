use crate::document::{write_json_string, Document};
use itertools::Itertools;
#[cfg(feature = "serde")]
use super::NUMBER_LONG;
use std::fmt::{Display, Formatter};

/// A value that can be appended to a filter [Document].
///
/// The set of variants mirrors what a MongoDB-style server accepts in a filter:
/// narrow integer types widen into [Value::I32] or [Value::I64], `f32` widens
/// into [Value::F64] and a `char` becomes a one-character [Value::String].
///
/// # Usage
/// ```text
/// let v1: Value = 42.into();           // I32
/// let v2 = Value::from("hello");       // String
/// let v3 = Value::from(vec![1, 2]);    // Array
/// ```
///
/// With the `serde` feature, [Value::I64] serializes as
/// `{"$numberLong": "<digits>"}` so that it deserializes back into
/// [Value::I64]; all other variants use the plain JSON-like shape.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Represents a null value.
    #[default]
    Null,
    /// Represents a boolean value.
    Bool(bool),
    /// Represents a signed 32-bit integer value.
    I32(i32),
    /// Represents a signed 64-bit integer value.
    I64(i64),
    /// Represents a 64-bit floating point value.
    F64(f64),
    /// Represents a string value.
    String(String),
    /// Represents an array value.
    Array(Vec<Value>),
    /// Represents a nested document value.
    Document(Document),
}

impl Value {
    pub fn as_bool(&self) -> Option<&bool> {
        match self {
            Value::Bool(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<&i32> {
        match self {
            Value::I32(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<&i64> {
        match self {
            Value::I64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<&f64> {
        match self {
            Value::F64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&String> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Value::Document(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_document_mut(&mut self) -> Option<&mut Document> {
        match self {
            Value::Document(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    pub fn is_document(&self) -> bool {
        matches!(self, Value::Document(_))
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Takes the value out, leaving [Value::Null] in its place.
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::I32(v) => write!(f, "{}", v),
            Value::I64(v) => write!(f, "{}", v),
            // Debug keeps the fractional part, so 5.0 does not print as an integer
            Value::F64(v) => write!(f, "{:?}", v),
            Value::String(v) => write_json_string(f, v),
            Value::Array(values) => write!(f, "[{}]", values.iter().join(", ")),
            Value::Document(doc) => write!(f, "{}", doc),
        }
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! value_from_widening {
    ($variant:ident: $($t:ty),+) => {
        $(
            impl From<$t> for Value {
                #[inline]
                fn from(value: $t) -> Self {
                    Value::$variant(value.into())
                }
            }
        )+
    };
}

value_from_widening!(I32: i8, i16, i32, u8, u16);
value_from_widening!(I64: i64, u32);
value_from_widening!(F64: f32, f64);

impl From<char> for Value {
    #[inline]
    fn from(value: char) -> Self {
        Value::String(value.to_string())
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Document> for Value {
    #[inline]
    fn from(value: Document) -> Self {
        Value::Document(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::Array(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::I32(v) => serializer.serialize_i32(*v),
            Value::I64(v) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(NUMBER_LONG, &v.to_string())?;
                map.end()
            }
            Value::F64(v) => serializer.serialize_f64(*v),
            Value::String(v) => serializer.serialize_str(v),
            Value::Array(values) => serializer.collect_seq(values),
            Value::Document(doc) => serde::Serialize::serialize(doc, serializer),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(feature = "serde")]
struct ValueVisitor;

#[cfg(feature = "serde")]
impl<'de> serde::de::Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("a filter value")
    }

    fn visit_bool<E: serde::de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(match i32::try_from(v) {
            Ok(narrow) => Value::I32(narrow),
            Err(_) => Value::I64(v),
        })
    }

    fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Value, E> {
        match (i32::try_from(v), i64::try_from(v)) {
            (Ok(narrow), _) => Ok(Value::I32(narrow)),
            (Err(_), Ok(wide)) => Ok(Value::I64(wide)),
            _ => Err(E::custom(format!("integer {} does not fit in 64 bits", v))),
        }
    }

    fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::F64(v))
    }

    fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_string()))
    }

    fn visit_string<E: serde::de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: serde::de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        serde::Deserialize::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(value) = seq.next_element::<Value>()? {
            values.push(value);
        }
        Ok(Value::Array(values))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut doc = Document::new();
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            doc.put(&key, value);
        }

        if doc.size() == 1 {
            if let Some(Value::String(digits)) = doc.get(NUMBER_LONG) {
                return match digits.parse::<i64>() {
                    Ok(v) => Ok(Value::I64(v)),
                    Err(e) => Err(serde::de::Error::custom(format!(
                        "invalid {} value {}: {}",
                        NUMBER_LONG, digits, e
                    ))),
                };
            }
        }
        Ok(Value::Document(doc))
    }
}
