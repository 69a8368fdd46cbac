//! Per-type field registries and field references.
//!
//! A record type lists its queryable fields once, in order, either with
//! `#[derive(Mapped)]` from `odm_query_derive` or with the [`mapped_fields!`](crate::mapped_fields)
//! macro. Filter expressions name a field through a [FieldRef], which can only
//! be obtained by resolving a [FieldAccessor] against that registry.
//!
//! ```rust,ignore
//! use odm_query::{key, mapped_fields};
//!
//! struct Point { x: i32, y: i32 }
//! mapped_fields!(Point { x, y });
//!
//! let x = key!(Point::x)?;
//! assert_eq!(x.name(), "x");
//! ```

mod field;
mod reference;
#[allow(clippy::module_inception)]
mod registry;

pub use field::*;
pub use reference::*;
pub use registry::*;

/// Builds the [FieldAccessor] of member `field` of type `owner`.
///
/// Fails to compile when `owner` has no member named `field`.
#[macro_export]
macro_rules! accessor {
    ($owner:ty, $field:ident) => {
        $crate::registry::FieldAccessor::<$owner, _>::new(
            ::core::mem::offset_of!($owner, $field),
            |owner| &owner.$field,
        )
    };
}

/// Resolves member `field` of the [Mapped] type `owner` to a [FieldRef].
///
/// Accepts `key!(Owner::field)` or `key!(Owner, field)` and evaluates to a
/// `QueryResult<FieldRef<Owner, _>>`. Members that do not exist fail to
/// compile; members that exist but are not registered fail with
/// `ErrorKind::FieldNotRegistered`.
#[macro_export]
macro_rules! key {
    ($owner:ident :: $field:ident) => {
        <$owner as $crate::registry::Mapped>::field($crate::accessor!($owner, $field))
    };
    ($owner:ty, $field:ident) => {
        <$owner as $crate::registry::Mapped>::field($crate::accessor!($owner, $field))
    };
}

/// Implements [Mapped] for a struct from an explicit, ordered field list.
///
/// Each entry is a member name, optionally followed by `=> "name"` to
/// register it under a different name.
///
/// ```rust,ignore
/// struct Bar { w: i64, x1: i32, z: String }
/// mapped_fields!(Bar { w, x1, z => "label" });
/// ```
#[macro_export]
macro_rules! mapped_fields {
    ($owner:ty { $($field:ident $(=> $name:literal)?),* $(,)? }) => {
        impl $crate::registry::Mapped for $owner {
            fn registry() -> &'static $crate::registry::FieldRegistry<Self> {
                static REGISTRY: ::std::sync::OnceLock<$crate::registry::FieldRegistry<$owner>> =
                    ::std::sync::OnceLock::new();
                REGISTRY.get_or_init(|| {
                    $crate::registry::FieldRegistry::<$owner>::builder()
                        $(.field($crate::accessor!($owner, $field), $crate::__field_name!($field $(, $name)?)))*
                        .build()
                })
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __field_name {
    ($field:ident) => {
        stringify!($field)
    };
    ($field:ident, $name:literal) => {
        $name
    };
}
