//! # Entity Management
//!
//! Entities are plain indices into the entity store and every component
//! column. A killed entity's index goes on a LIFO free-list and is handed
//! out again by the next spawn.

use std::fmt;

use crate::bits;
use crate::error::{EcsError, EcsResult};

/// Handle of an entity: its index in the entity store.
///
/// Handles are dense and recyclable. The same value may denote a different
/// entity after its previous owner has been killed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a handle from a raw index.
    #[inline]
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Returns the index as a slot position in the dense arrays.
    #[inline]
    #[must_use]
    pub const fn slot(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Liveness flag and component mask of one entity slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Entity {
    /// Whether the slot currently denotes a live entity.
    pub alive: bool,
    /// Bit `i` is set iff the entity has the component with registry index `i`.
    pub component_mask: u64,
}

impl Entity {
    /// Creates a live entity with no components.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            alive: true,
            component_mask: 0,
        }
    }

    /// Checks if this entity has the component with the given registry index.
    #[inline]
    #[must_use]
    pub const fn has_component(self, component_index: u8) -> bool {
        bits::is_bit_on(component_index, self.component_mask)
    }

    /// Sets the mask bit for the given registry index.
    #[inline]
    pub fn add_component(&mut self, component_index: u8) {
        self.component_mask = bits::set_bit(component_index, self.component_mask);
    }

    /// Returns `true` if the entity is alive and has every component in `required`.
    #[inline]
    #[must_use]
    pub const fn matches(self, required: u64) -> bool {
        self.alive && bits::check_mask(self.component_mask, required)
    }
}

/// Owner of all entity slots and the free-list of killed handles.
///
/// Invariants:
/// - a handle is on the free-list iff its slot is dead
/// - no handle is on the free-list twice
/// - every handle on the free-list is `< len()`
/// - `len() <= limit()`
#[derive(Debug)]
pub struct EntityStore {
    entities: Vec<Entity>,
    free: Vec<EntityId>,
    /// Maximum number of handles ever allocated.
    limit: u32,
}

impl EntityStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with room for `capacity` entities.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_limit(capacity, u32::MAX)
    }

    /// Creates an empty store that allocates at most `limit` handles.
    ///
    /// Recycled handles do not count against the limit; only fresh ones do.
    #[must_use]
    pub fn with_limit(capacity: usize, limit: u32) -> Self {
        Self {
            entities: Vec::with_capacity(capacity),
            free: Vec::new(),
            limit,
        }
    }

    /// Spawns an entity, recycling the most recently killed handle if any.
    ///
    /// A recycled slot keeps the mask it was left with; [`EntityStore::kill`]
    /// clears it, so it is always zero here.
    ///
    /// # Errors
    ///
    /// [`EcsError::HandlesExhausted`] if the free-list is empty and
    /// [`EntityStore::limit`] handles are already allocated.
    pub fn spawn(&mut self) -> EcsResult<EntityId> {
        if let Some(id) = self.free.pop() {
            self.entities[id.slot()].alive = true;
            tracing::trace!(%id, "recycled entity handle");
            return Ok(id);
        }

        let exhausted = EcsError::HandlesExhausted { limit: self.limit };
        let index = u32::try_from(self.entities.len()).map_err(|_| exhausted.clone())?;
        if index >= self.limit {
            return Err(exhausted);
        }

        let id = EntityId::new(index);
        self.entities.push(Entity::new());
        tracing::trace!(%id, "allocated entity handle");
        Ok(id)
    }

    /// Kills a live entity and returns its handle to the free-list.
    ///
    /// The component mask is cleared so a recycled handle starts empty.
    ///
    /// # Errors
    ///
    /// [`EcsError::InvalidHandle`] if `id` was never allocated,
    /// [`EcsError::NotAlive`] if the entity is already dead.
    pub fn kill(&mut self, id: EntityId) -> EcsResult<()> {
        let entity = self.get_mut(id)?;
        if !entity.alive {
            return Err(EcsError::NotAlive(id));
        }

        entity.alive = false;
        entity.component_mask = 0;
        self.free.push(id);
        tracing::trace!(%id, "killed entity");
        Ok(())
    }

    /// Returns the slot for `id`, alive or not.
    ///
    /// # Errors
    ///
    /// [`EcsError::InvalidHandle`] if `id` was never allocated.
    pub fn get(&self, id: EntityId) -> EcsResult<&Entity> {
        self.entities.get(id.slot()).ok_or(EcsError::InvalidHandle {
            index: id.index(),
            len: self.entities.len(),
        })
    }

    /// Returns the slot for `id` mutably, alive or not.
    ///
    /// # Errors
    ///
    /// [`EcsError::InvalidHandle`] if `id` was never allocated.
    pub fn get_mut(&mut self, id: EntityId) -> EcsResult<&mut Entity> {
        let len = self.entities.len();
        self.entities.get_mut(id.slot()).ok_or(EcsError::InvalidHandle {
            index: id.index(),
            len,
        })
    }

    /// Returns the slot for `id` mutably if it is alive.
    ///
    /// # Errors
    ///
    /// [`EcsError::InvalidHandle`] or [`EcsError::NotAlive`].
    pub fn get_alive_mut(&mut self, id: EntityId) -> EcsResult<&mut Entity> {
        let entity = self.get_mut(id)?;
        if entity.alive {
            Ok(entity)
        } else {
            Err(EcsError::NotAlive(id))
        }
    }

    /// Checks if an entity is alive. Unknown handles are not alive.
    #[inline]
    #[must_use]
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.entities.get(id.slot()).is_some_and(|e| e.alive)
    }

    /// Number of handles ever allocated, alive or dead.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if no handle was ever allocated.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Maximum number of handles this store hands out.
    #[inline]
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of currently alive entities.
    #[inline]
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.entities.len() - self.free.len()
    }

    /// Iterates over every slot in ascending handle order.
    #[allow(clippy::cast_possible_truncation)]
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities
            .iter()
            .enumerate()
            .map(|(index, entity)| (EntityId::new(index as u32), entity))
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}
