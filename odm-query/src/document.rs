use crate::common::Value;
use indexmap::IndexMap;
use itertools::Itertools;
use std::fmt::{Debug, Display, Formatter, Write};

/// An ordered filter document.
///
/// A document is a list of key/value pairs that keeps insertion order, which
/// is what a MongoDB-style server expects of a filter: the first predicate
/// appended is the first key serialized. Overwriting a key keeps its original
/// position.
#[derive(Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Document {
    data: IndexMap<String, Value>,
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Document {
            data: IndexMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Associates `value` with `key`, returning the value previously stored
    /// under that key.
    ///
    /// A new key is appended at the end; an existing key keeps its position.
    pub fn put<V: Into<Value>>(&mut self, key: &str, value: V) -> Option<Value> {
        self.data.insert(key.to_string(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.data.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Removes `key`, keeping the relative order of the remaining keys.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.shift_remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Renders the document on one line, with keys in insertion order.
    pub fn to_json(&self) -> String {
        self.to_string()
    }

    /// Returns the keys joined with `", "`, in insertion order.
    pub fn key_list(&self) -> String {
        self.data.keys().join(", ")
    }

    /// Returns true when every key is an operator keyword (`$`-prefixed).
    pub fn is_operator_document(&self) -> bool {
        !self.data.is_empty() && self.data.keys().all(|k| k.starts_with('$'))
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_char('{')?;
        for (i, (key, value)) in self.data.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write_json_string(f, key)?;
            write!(f, ": {}", value)?;
        }
        f.write_char('}')
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl IntoIterator for Document {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl FromIterator<(String, Value)> for Document {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Document {
            data: iter.into_iter().collect(),
        }
    }
}

pub(crate) fn write_json_string<W: Write>(w: &mut W, s: &str) -> std::fmt::Result {
    w.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => w.write_str("\\\"")?,
            '\\' => w.write_str("\\\\")?,
            '\n' => w.write_str("\\n")?,
            '\r' => w.write_str("\\r")?,
            '\t' => w.write_str("\\t")?,
            c if c.is_control() => write!(w, "\\u{:04x}", c as u32)?,
            c => w.write_char(c)?,
        }
    }
    w.write_char('"')
}

/// Creates a [Document] from literal key/value pairs.
///
/// Keys are string literals. Values are single token trees: a literal, a
/// parenthesized expression, a nested `{ ... }` document or a `[ ... ]` array.
///
/// ```rust,ignore
/// let filter = doc! {
///     "$and": [
///         { "x": { "$eq": 5 } },
///         { "y": { "$gt": (offset + 1) } }
///     ]
/// };
/// ```
#[macro_export]
macro_rules! doc {
    () => {
        $crate::document::Document::new()
    };

    ($($key:literal : $value:tt),* $(,)?) => {
        {
            let mut doc = $crate::document::Document::new();
            $(
                doc.put($key, $crate::doc_value!($value));
            )*
            doc
        }
    };
}

/// Helper macro converting one `doc!` value.
#[macro_export]
macro_rules! doc_value {
    ({ $($key:literal : $value:tt),* $(,)? }) => {
        $crate::common::Value::Document($crate::doc!{ $($key : $value),* })
    };

    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Array(vec![$($crate::doc_value!($value)),*])
    };

    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_keeps_insertion_order() {
        let mut doc = Document::new();
        doc.put("b", 1);
        doc.put("a", 2);
        doc.put("c", 3);
        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    #[test]
    fn put_overwrites_in_place() {
        let mut doc = doc! { "a": 1, "b": 2 };
        let previous = doc.put("a", 10);
        assert_eq!(previous, Some(Value::I32(1)));
        assert_eq!(doc.key_list(), "a, b");
        assert_eq!(doc.get("a"), Some(&Value::I32(10)));
    }

    #[test]
    fn remove_preserves_order_of_rest() {
        let mut doc = doc! { "a": 1, "b": 2, "c": 3 };
        assert_eq!(doc.remove("b"), Some(Value::I32(2)));
        assert_eq!(doc.key_list(), "a, c");
        assert!(doc.remove("z").is_none());
    }

    #[test]
    fn get_mut_and_contains_key() {
        let mut doc = doc! { "a": [1] };
        doc.get_mut("a")
            .and_then(Value::as_array_mut)
            .unwrap()
            .push(Value::I32(2));
        assert!(doc.contains_key("a"));
        assert!(!doc.contains_key("b"));
        assert_eq!(doc.get("a"), Some(&Value::from(vec![1, 2])));
    }

    #[test]
    fn operator_document_detection() {
        assert!(doc! { "$gt": 1, "$lt": 5 }.is_operator_document());
        assert!(!doc! { "$gt": 1, "x": 5 }.is_operator_document());
        assert!(!Document::new().is_operator_document());
    }

    #[test]
    fn doc_macro_builds_nested_values() {
        let offset = 4;
        let doc = doc! {
            "$and": [
                { "x": { "$eq": 5 } },
                { "y": { "$gt": (offset + 1) } }
            ]
        };
        assert_eq!(
            doc.to_json(),
            r#"{"$and": [{"x": {"$eq": 5}}, {"y": {"$gt": 5}}]}"#
        );
    }

    #[test]
    fn empty_document_display() {
        assert_eq!(doc! {}.to_string(), "{}");
        assert!(doc! {}.is_empty());
        assert_eq!(doc! {}.size(), 0);
    }

    #[test]
    fn display_escapes_keys_and_strings() {
        let doc = doc! { "a\"b": "line\nbreak" };
        assert_eq!(doc.to_string(), r#"{"a\"b": "line\nbreak"}"#);
    }

    #[test]
    fn collect_from_pairs() {
        let doc: Document = vec![("x".to_string(), Value::I32(1))].into_iter().collect();
        assert_eq!(doc, doc! { "x": 1 });
        let pairs: Vec<_> = (&doc).into_iter().collect();
        assert_eq!(pairs.len(), 1);
        assert_eq!(doc.iter().next(), Some(("x", &Value::I32(1))));
    }
}
