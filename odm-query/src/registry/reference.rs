use std::fmt::{Debug, Display, Formatter};

use super::FieldAccessor;

/// A field of `O` bound to the name it is registered under.
///
/// A `FieldRef` is only handed out by [FieldRegistry::resolve](super::FieldRegistry::resolve)
/// (usually through the [`key!`](crate::key) macro), so holding one proves the
/// field is registered. It is the only way a filter expression can name a
/// field. Comparison values are checked against `T` at compile time:
///
/// ```compile_fail
/// use odm_query::{key, mapped_fields};
///
/// struct Point { x: i32, y: i32 }
/// mapped_fields!(Point { x, y });
///
/// // an i32 field cannot be compared with a string
/// let _ = key!(Point::x).unwrap().eq("five");
/// ```
///
/// Boolean fields accept nothing but a `bool`:
///
/// ```compile_fail
/// use odm_query::{key, mapped_fields};
///
/// struct Flag { on: bool }
/// mapped_fields!(Flag { on });
///
/// let _ = key!(Flag::on).unwrap().eq(1);
/// ```
///
/// Nor does a `bool` reach a numeric field:
///
/// ```compile_fail
/// use odm_query::{key, mapped_fields};
///
/// struct Point { x: i32, y: i32 }
/// mapped_fields!(Point { x, y });
///
/// let _ = key!(Point::x).unwrap().eq(true);
/// ```
///
/// ```compile_fail
/// use odm_query::{key, mapped_fields};
///
/// struct Reading { level: f64 }
/// mapped_fields!(Reading { level });
///
/// let _ = key!(Reading::level).unwrap().gt(false);
/// ```
///
/// Naming a member the type does not have is rejected as well:
///
/// ```compile_fail
/// use odm_query::{key, mapped_fields};
///
/// struct Point { x: i32, y: i32 }
/// mapped_fields!(Point { x, y });
///
/// let _ = key!(Point::z);
/// ```
pub struct FieldRef<O, T> {
    accessor: FieldAccessor<O, T>,
    name: &'static str,
}

impl<O, T> FieldRef<O, T> {
    pub(crate) fn new(accessor: FieldAccessor<O, T>, name: &'static str) -> Self {
        FieldRef { accessor, name }
    }

    /// The registered name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn accessor(&self) -> FieldAccessor<O, T> {
        self.accessor
    }

    /// Reads the referenced member from `owner`.
    #[inline]
    pub fn get<'a>(&self, owner: &'a O) -> &'a T {
        self.accessor.get(owner)
    }
}

impl<O, T> Clone for FieldRef<O, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O, T> Copy for FieldRef<O, T> {}

impl<O, T> Debug for FieldRef<O, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "FieldRef({}, {:?})", self.name, self.accessor)
    }
}

impl<O, T> Display for FieldRef<O, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use crate::registry::Mapped;

    struct Point {
        x: i32,
        y: i32,
    }

    crate::mapped_fields!(Point { x, y });

    #[test]
    fn key_resolves_registered_name() {
        let x = crate::key!(Point::x).unwrap();
        let y = crate::key!(Point, y).unwrap();
        assert_eq!(x.name(), "x");
        assert_eq!(y.name(), "y");
        assert_eq!(x.to_string(), "x");
        assert!(format!("{:?}", y).starts_with("FieldRef(y"));
    }

    #[test]
    fn field_ref_reads_owner() {
        let point = Point { x: 5, y: 6 };
        let x = Point::field(crate::accessor!(Point, x)).unwrap();
        let copy = x;
        assert_eq!(*x.get(&point), 5);
        assert_eq!(*copy.get(&point), 5);
        assert_eq!(*crate::key!(Point::y).unwrap().get(&point), 6);
    }
}
