//! # Component Type Registry
//!
//! Assigns every component type of a [`System`](crate::System) a fixed index
//! in `0..64`, the bit it owns in every entity mask. The list is frozen at
//! construction; duplicates and overflow are rejected there.

use std::any::{type_name, TypeId};
use std::collections::HashMap;

use super::component::{Component, ComponentSet};
use crate::bits;
use crate::error::{EcsError, EcsResult};

/// Maximum number of component types per system (one bit each in a `u64`).
pub const MAX_COMPONENTS: usize = 64;

/// Ordered, duplicate-free list of component types.
#[derive(Debug, Default, Clone)]
pub struct TypeRegistry {
    indices: HashMap<TypeId, u8>,
    names: Vec<&'static str>,
}

impl TypeRegistry {
    /// Builds a registry from `(TypeId, name)` pairs in index order.
    ///
    /// # Errors
    ///
    /// [`EcsError::TooManyComponents`] for more than [`MAX_COMPONENTS`] entries,
    /// [`EcsError::DuplicateComponent`] if a type appears twice.
    pub fn new<I>(types: I) -> EcsResult<Self>
    where
        I: IntoIterator<Item = (TypeId, &'static str)>,
    {
        let types: Vec<_> = types.into_iter().collect();
        let count = types.len();
        if count > MAX_COMPONENTS {
            return Err(EcsError::TooManyComponents { count });
        }

        let mut registry = Self::default();
        for (type_id, name) in types {
            if registry.indices.contains_key(&type_id) {
                return Err(EcsError::DuplicateComponent { name });
            }

            let index = u8::try_from(registry.names.len())
                .map_err(|_| EcsError::TooManyComponents { count })?;
            registry.indices.insert(type_id, index);
            registry.names.push(name);
        }

        Ok(registry)
    }

    /// Returns the registry index of `C`.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnregisteredComponent`] if `C` is not in this registry.
    pub fn index_of<C: Component>(&self) -> EcsResult<u8> {
        self.index_of_id(TypeId::of::<C>(), type_name::<C>())
    }

    fn index_of_id(&self, type_id: TypeId, name: &'static str) -> EcsResult<u8> {
        self.indices
            .get(&type_id)
            .copied()
            .ok_or(EcsError::UnregisteredComponent { name })
    }

    /// Compiles a set of component types into one mask.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnregisteredComponent`] naming the first unknown type.
    pub fn mask_of<S: ComponentSet>(&self) -> EcsResult<u64> {
        let mut mask = 0;
        let mut missing = None;

        S::visit(|type_id, name| match self.index_of_id(type_id, name) {
            Ok(index) => mask = bits::set_bit(index, mask),
            Err(err) => {
                missing.get_or_insert(err);
            }
        });

        match missing {
            Some(err) => Err(err),
            None => Ok(mask),
        }
    }

    /// Type name of the component at `index`.
    #[must_use]
    pub fn name_of(&self, index: u8) -> Option<&'static str> {
        self.names.get(usize::from(index)).copied()
    }

    /// Type names in index order.
    #[must_use]
    pub fn names(&self) -> &[&'static str] {
        &self.names
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no type is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
