use std::any::type_name;

use crate::errors::{ErrorKind, QueryError, QueryResult};

use super::{FieldAccessor, FieldDescriptor, FieldRef};

/// A record type with a field registry.
///
/// Implemented by `#[derive(Mapped)]` or by the
/// [`mapped_fields!`](crate::mapped_fields) macro. The registry is built on
/// first access and lives for the rest of the process.
pub trait Mapped: Sized + 'static {
    /// The registry of this type's queryable fields.
    fn registry() -> &'static FieldRegistry<Self>;

    /// Resolves `accessor` to a field reference usable in filter expressions.
    fn field<T: 'static>(accessor: FieldAccessor<Self, T>) -> QueryResult<FieldRef<Self, T>> {
        Self::registry().resolve(accessor)
    }
}

/// The ordered list of queryable fields of a record type `O`.
///
/// Fields keep the order in which they were declared. The registry records
/// what its author supplied and does not reject repeated names or repeated
/// accessors; resolution returns the first match.
pub struct FieldRegistry<O> {
    owner: &'static str,
    descriptors: Vec<FieldDescriptor<O>>,
}

impl<O: 'static> FieldRegistry<O> {
    pub fn builder() -> FieldRegistryBuilder<O> {
        FieldRegistryBuilder {
            descriptors: Vec::new(),
        }
    }

    /// Name of the record type owning this registry.
    pub fn owner(&self) -> &'static str {
        self.owner
    }

    pub fn size(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// The descriptor declared at `index`, or `None` past the last field.
    pub fn descriptor_at(&self, index: usize) -> Option<&FieldDescriptor<O>> {
        self.descriptors.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor<O>> {
        self.descriptors.iter()
    }

    /// Registered names in declaration order.
    pub fn field_names(&self) -> Vec<&'static str> {
        self.descriptors.iter().map(FieldDescriptor::name).collect()
    }

    /// Resolves `accessor` against this registry.
    ///
    /// Scans the descriptors in declaration order and returns a reference to
    /// the first one declared with member type `T` whose accessor is
    /// `accessor`. Fails with [ErrorKind::FieldNotRegistered] when no
    /// descriptor matches, or [ErrorKind::TypeMismatch] when the member is
    /// registered under another type.
    pub fn resolve<T: 'static>(&self, accessor: FieldAccessor<O, T>) -> QueryResult<FieldRef<O, T>> {
        for descriptor in &self.descriptors {
            if let Some(registered) = descriptor.accessor::<T>() {
                if *registered == accessor {
                    return Ok(FieldRef::new(accessor, descriptor.name()));
                }
            }
        }

        if let Some(descriptor) = self
            .descriptors
            .iter()
            .find(|d| d.offset() == accessor.offset())
        {
            log::error!(
                "Field {} of {} is declared as {}, not {}",
                descriptor.name(),
                self.owner,
                descriptor.type_name(),
                type_name::<T>()
            );
            return Err(QueryError::new(
                &format!(
                    "Field {} of {} is declared as {}, not {}",
                    descriptor.name(),
                    self.owner,
                    descriptor.type_name(),
                    type_name::<T>()
                ),
                ErrorKind::TypeMismatch,
            ));
        }

        log::error!(
            "No field at offset {} of {} is registered",
            accessor.offset(),
            self.owner
        );
        Err(QueryError::new(
            &format!(
                "Field at offset {} of {} is not registered",
                accessor.offset(),
                self.owner
            ),
            ErrorKind::FieldNotRegistered,
        ))
    }
}

/// Collects the fields of a [FieldRegistry] in declaration order.
pub struct FieldRegistryBuilder<O> {
    descriptors: Vec<FieldDescriptor<O>>,
}

impl<O: 'static> FieldRegistryBuilder<O> {
    /// Declares the next field.
    pub fn field<T: 'static>(mut self, accessor: FieldAccessor<O, T>, name: &'static str) -> Self {
        let position = self.descriptors.len();
        self.descriptors
            .push(FieldDescriptor::new(name, position, accessor));
        self
    }

    pub fn build(self) -> FieldRegistry<O> {
        let owner = type_name::<O>();
        log::debug!(
            "Initialized field registry for {} with {} fields",
            owner,
            self.descriptors.len()
        );
        FieldRegistry {
            owner,
            descriptors: self.descriptors,
        }
    }
}
