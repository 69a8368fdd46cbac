use std::any::{type_name, Any, TypeId};
use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;

/// Identifies one member of a record type `O` whose type is `T`.
///
/// An accessor is the member's byte offset inside `O` together with a getter.
/// Two accessors are the same field when their offsets are equal; the member
/// type is part of the accessor's static type. Build accessors with the
/// [`accessor!`](crate::accessor) macro, which refuses to compile when `O`
/// has no such member.
pub struct FieldAccessor<O, T> {
    offset: usize,
    get: fn(&O) -> &T,
}

impl<O, T> FieldAccessor<O, T> {
    #[inline]
    pub const fn new(offset: usize, get: fn(&O) -> &T) -> Self {
        FieldAccessor { offset, get }
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Reads the member from `owner`.
    #[inline]
    pub fn get<'a>(&self, owner: &'a O) -> &'a T {
        (self.get)(owner)
    }
}

impl<O, T> Clone for FieldAccessor<O, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O, T> Copy for FieldAccessor<O, T> {}

impl<O, T> PartialEq for FieldAccessor<O, T> {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset
    }
}

impl<O, T> Eq for FieldAccessor<O, T> {}

impl<O, T> Debug for FieldAccessor<O, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FieldAccessor<{}, {}>(+{})",
            type_name::<O>(),
            type_name::<T>(),
            self.offset
        )
    }
}

/// One registered field of a record type `O`.
///
/// The descriptor keeps the typed [FieldAccessor] behind a type-erased box;
/// [FieldDescriptor::accessor] recovers it only when asked for the declared
/// member type.
pub struct FieldDescriptor<O> {
    name: &'static str,
    position: usize,
    offset: usize,
    type_id: TypeId,
    type_name: &'static str,
    accessor: Box<dyn Any + Send + Sync>,
    _owner: PhantomData<fn(&O)>,
}

impl<O: 'static> FieldDescriptor<O> {
    pub(crate) fn new<T: 'static>(
        name: &'static str,
        position: usize,
        accessor: FieldAccessor<O, T>,
    ) -> Self {
        FieldDescriptor {
            name,
            position,
            offset: accessor.offset(),
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            accessor: Box::new(accessor),
            _owner: PhantomData,
        }
    }

    /// The name the field is serialized under.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declaration position inside the registry.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns true when the field was declared with member type `T`.
    pub fn is_declared_as<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// The typed accessor, if the field was declared with member type `T`.
    pub fn accessor<T: 'static>(&self) -> Option<&FieldAccessor<O, T>> {
        self.accessor.downcast_ref::<FieldAccessor<O, T>>()
    }
}

impl<O> Debug for FieldDescriptor<O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("position", &self.position)
            .field("offset", &self.offset)
            .field("type", &self.type_name)
            .finish()
    }
}
