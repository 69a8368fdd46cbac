use crate::common::{Value, AND_OPERATOR};
use crate::document::Document;
use crate::expression::Expression;

/// Serializes `expression` into a filter document.
///
/// Each call uses its own [DocumentBuilder]; serializing the same expression
/// twice gives equal documents.
pub fn serialize<E: Expression + ?Sized>(expression: &E) -> Document {
    let mut builder = DocumentBuilder::new();
    expression.append_to(&mut builder);
    builder.finish()
}

/// The mutable scope of one serialization.
///
/// Expressions append key/value pairs in construction order. Two pairs that
/// land on the same key are never silently overwritten:
///
/// * a predicate on a field that already has one merges into its operator
///   document when their operators are disjoint (`{x: {$gt: 1, $lt: 5}}`),
///   and otherwise moves into the top-level `$and` array;
/// * a second `$and` combination extends the existing `$and` array;
/// * any other repeated combinator moves into the `$and` array.
#[derive(Default)]
pub struct DocumentBuilder {
    document: Document,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        DocumentBuilder {
            document: Document::new(),
        }
    }

    /// Appends `{field: operators}`.
    pub fn append_predicate(&mut self, field: &str, operators: Document) {
        let mergeable = match self.document.get(field) {
            None => None,
            Some(Value::Document(existing)) => Some(
                existing.is_operator_document()
                    && operators.is_operator_document()
                    && operators.keys().all(|op| !existing.contains_key(op)),
            ),
            Some(_) => Some(false),
        };

        match mergeable {
            None => {
                self.document.put(field, operators);
            }
            Some(true) => {
                log::trace!("Merging {} into the predicate on {}", operators, field);
                if let Some(existing) = self.document.get_mut(field).and_then(Value::as_document_mut) {
                    for (op, value) in operators {
                        existing.put(&op, value);
                    }
                }
            }
            Some(false) => {
                log::warn!(
                    "Predicate {} on {} overlaps an earlier one, moving it into {}",
                    operators,
                    field,
                    AND_OPERATOR
                );
                let mut conjunct = Document::new();
                conjunct.put(field, operators);
                self.push_conjuncts(vec![Value::Document(conjunct)]);
            }
        }
    }

    /// Appends `{keyword: [branches...]}`.
    pub fn append_combination(&mut self, keyword: &str, branches: Vec<Document>) {
        let branches: Vec<Value> = branches.into_iter().map(Value::Document).collect();

        if keyword == AND_OPERATOR {
            self.push_conjuncts(branches);
        } else if self.document.contains_key(keyword) {
            log::warn!(
                "Combination {} appears twice in one document, moving it into {}",
                keyword,
                AND_OPERATOR
            );
            let mut conjunct = Document::new();
            conjunct.put(keyword, Value::Array(branches));
            self.push_conjuncts(vec![Value::Document(conjunct)]);
        } else {
            self.document.put(keyword, Value::Array(branches));
        }
    }

    pub fn finish(self) -> Document {
        self.document
    }

    fn push_conjuncts(&mut self, conjuncts: Vec<Value>) {
        match self.document.get_mut(AND_OPERATOR) {
            Some(Value::Array(existing)) => existing.extend(conjuncts),
            Some(other) => {
                // "$and" registered as a plain field name
                let mut previous = Document::new();
                previous.put(AND_OPERATOR, other.take());
                let mut all = vec![Value::Document(previous)];
                all.extend(conjuncts);
                *other = Value::Array(all);
            }
            None => {
                self.document.put(AND_OPERATOR, Value::Array(conjuncts));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;

    #[test]
    fn predicates_on_distinct_fields_become_sibling_keys() {
        let mut builder = DocumentBuilder::new();
        builder.append_predicate("x", doc! { "$eq": 5 });
        builder.append_predicate("y", doc! { "$gt": 6 });
        assert_eq!(
            builder.finish(),
            doc! { "x": { "$eq": 5 }, "y": { "$gt": 6 } }
        );
    }

    #[test]
    fn disjoint_predicates_on_one_field_merge() {
        let mut builder = DocumentBuilder::new();
        builder.append_predicate("x", doc! { "$gt": 1 });
        builder.append_predicate("x", doc! { "$lt": 5 });
        assert_eq!(builder.finish(), doc! { "x": { "$gt": 1, "$lt": 5 } });
    }

    #[test]
    fn overlapping_predicates_move_into_and() {
        let mut builder = DocumentBuilder::new();
        builder.append_predicate("x", doc! { "$eq": 1 });
        builder.append_predicate("x", doc! { "$eq": 2 });
        assert_eq!(
            builder.finish(),
            doc! {
                "x": { "$eq": 1 },
                "$and": [ { "x": { "$eq": 2 } } ]
            }
        );
    }

    #[test]
    fn repeated_and_extends_array() {
        let mut builder = DocumentBuilder::new();
        builder.append_combination("$and", vec![doc! { "a": 1 }, doc! { "b": 2 }]);
        builder.append_combination("$and", vec![doc! { "c": 3 }, doc! { "d": 4 }]);
        assert_eq!(
            builder.finish(),
            doc! { "$and": [ { "a": 1 }, { "b": 2 }, { "c": 3 }, { "d": 4 } ] }
        );
    }

    #[test]
    fn repeated_or_moves_into_and() {
        let mut builder = DocumentBuilder::new();
        builder.append_combination("$or", vec![doc! { "a": 1 }, doc! { "b": 2 }]);
        builder.append_combination("$or", vec![doc! { "c": 3 }, doc! { "d": 4 }]);
        assert_eq!(
            builder.finish(),
            doc! {
                "$or": [ { "a": 1 }, { "b": 2 } ],
                "$and": [ { "$or": [ { "c": 3 }, { "d": 4 } ] } ]
            }
        );
    }

    #[test]
    fn plain_and_field_is_preserved() {
        let mut builder = DocumentBuilder::new();
        builder.append_predicate("$and", doc! { "$eq": 1 });
        builder.append_combination("$and", vec![doc! { "a": 1 }]);
        assert_eq!(
            builder.finish(),
            doc! { "$and": [ { "$and": { "$eq": 1 } }, { "a": 1 } ] }
        );
    }
}
