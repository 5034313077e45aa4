//! # Component Storage
//!
//! One dense column per component type, index-aligned with the entity store:
//! slot `h` of every column belongs to entity handle `h`.
//!
//! The storage uses a dense array strategy:
//! - A slot exists for every handle ever allocated
//! - Access is O(1) via entity index
//! - Iteration is cache-friendly (contiguous memory)
//!
//! A slot only carries meaning while its entity is alive and has the
//! component's mask bit set. Everything else is default or stale data.

use std::any::{type_name, Any};

use bytemuck::Pod;

use super::component::Component;

/// Dense storage for a single component type.
///
/// # Type Parameters
///
/// * `C` - The component type to store
///
/// # Example
///
/// ```rust
/// use maskecs_core::{Component, ComponentStorage};
///
/// #[derive(Clone, Copy, Debug, Default, PartialEq)]
/// struct Mass(f32);
/// impl Component for Mass {}
///
/// let mut storage: ComponentStorage<Mass> = ComponentStorage::with_capacity(16);
/// storage.push_default();
/// assert!(storage.set(0, Mass(2.0)));
/// assert_eq!(storage.get(0), Some(&Mass(2.0)));
/// ```
#[derive(Debug)]
pub struct ComponentStorage<C: Component> {
    data: Vec<C>,
}

impl<C: Component> ComponentStorage<C> {
    /// Creates an empty column.
    #[must_use]
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Creates an empty column with room for `capacity` slots.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Number of slots (equals the number of allocated entity handles).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the column has no slots.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Appends one default-initialized slot.
    #[inline]
    pub fn push_default(&mut self) {
        self.data.push(C::default());
    }

    /// Gets a component by entity index.
    ///
    /// Returns `None` if `index` is out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&C> {
        self.data.get(index)
    }

    /// Gets a mutable component by entity index.
    ///
    /// Returns `None` if `index` is out of bounds.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut C> {
        self.data.get_mut(index)
    }

    /// Overwrites the slot at `index`.
    ///
    /// Returns `false` if `index` was out of bounds.
    #[inline]
    pub fn set(&mut self, index: usize, component: C) -> bool {
        if let Some(slot) = self.data.get_mut(index) {
            *slot = component;
            true
        } else {
            false
        }
    }

    /// Resets the slot at `index` to its default value.
    #[inline]
    pub fn reset(&mut self, index: usize) {
        if let Some(slot) = self.data.get_mut(index) {
            *slot = C::default();
        }
    }

    /// Returns a slice of all slots, meaningful or not.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[C] {
        &self.data
    }

    /// Returns a mutable slice of all slots.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [C] {
        &mut self.data
    }

    /// Iterates over all slots with their indices.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (usize, &C)> {
        self.data.iter().enumerate()
    }

    /// Iterates mutably over all slots with their indices.
    #[inline]
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut C)> {
        self.data.iter_mut().enumerate()
    }
}

impl<C: Component + Pod> ComponentStorage<C> {
    /// Raw bytes of the whole column, for snapshots or uploads.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}

impl<C: Component> Default for ComponentStorage<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Type-erased view of a [`ComponentStorage`], so the system can keep all
/// columns in one list indexed by registry index.
pub(crate) trait Column {
    fn push_default(&mut self);
    fn reset(&mut self, index: usize);
    fn len(&self) -> usize;
    fn component_name(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<C: Component> Column for ComponentStorage<C> {
    fn push_default(&mut self) {
        ComponentStorage::push_default(self);
    }

    fn reset(&mut self, index: usize) {
        ComponentStorage::reset(self, index);
    }

    fn len(&self) -> usize {
        ComponentStorage::len(self)
    }

    fn component_name(&self) -> &'static str {
        type_name::<C>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
