//! # ECS System
//!
//! The central container: owns the registry, the entity store and one column
//! per registered component type, answers mask queries and runs update hooks.

use std::any::{type_name, TypeId};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::component::{Component, ComponentSet};
use super::entity::{EntityId, EntityStore};
use super::registry::TypeRegistry;
use super::storage::{Column, ComponentStorage};
use crate::error::{EcsError, EcsResult};

/// Logic invoked once per [`System::update`].
///
/// Hooks get the system itself and are free to query, spawn, kill and write
/// components. Any `FnMut(&mut System) -> EcsResult<()>` is a hook.
pub trait UpdateHook {
    /// Runs the hook against the system.
    ///
    /// # Errors
    ///
    /// Whatever the hook reports; it aborts the current update.
    fn run(&mut self, system: &mut System) -> EcsResult<()>;

    /// Get the name of this hook for logging
    fn name(&self) -> &str {
        type_name::<Self>()
    }
}

impl<F> UpdateHook for F
where
    F: FnMut(&mut System) -> EcsResult<()>,
{
    fn run(&mut self, system: &mut System) -> EcsResult<()> {
        self(system)
    }
}

type ColumnFactory = fn(usize) -> Box<dyn Column>;

/// Shared so `update` can walk a snapshot while hooks replace the list.
type HookList = Rc<[RefCell<Box<dyn UpdateHook>>]>;

fn make_column<C: Component>(capacity: usize) -> Box<dyn Column> {
    Box::new(ComponentStorage::<C>::with_capacity(capacity))
}

/// Collects the component list of a [`System`] before it exists.
///
/// # Example
///
/// ```rust
/// use maskecs_core::{Component, EcsError, System};
///
/// #[derive(Default)]
/// struct Tag;
/// impl Component for Tag {}
///
/// let err = System::builder()
///     .with_component::<Tag>()
///     .with_component::<Tag>()
///     .build()
///     .unwrap_err();
/// assert!(matches!(err, EcsError::DuplicateComponent { .. }));
/// ```
#[derive(Default)]
pub struct SystemBuilder {
    types: Vec<(TypeId, &'static str)>,
    factories: Vec<ColumnFactory>,
    capacity: usize,
    max_entities: Option<u32>,
}

impl SystemBuilder {
    /// Creates a builder with no components.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `C` to the component list. Its registry index is its position.
    #[must_use]
    pub fn with_component<C: Component>(mut self) -> Self {
        self.types.push((TypeId::of::<C>(), type_name::<C>()));
        self.factories.push(make_column::<C>);
        self
    }

    /// Pre-allocates entity slots and every column for `capacity` entities.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Caps the number of handles the system ever allocates. Without a cap,
    /// every `u32` index is usable.
    #[must_use]
    pub fn with_max_entities(mut self, max_entities: u32) -> Self {
        self.max_entities = Some(max_entities);
        self
    }

    /// Validates the component list and creates the system.
    ///
    /// # Errors
    ///
    /// [`EcsError::DuplicateComponent`] or [`EcsError::TooManyComponents`].
    pub fn build(self) -> EcsResult<System> {
        let registry = TypeRegistry::new(self.types)?;
        let columns = self
            .factories
            .into_iter()
            .map(|factory| factory(self.capacity))
            .collect();

        tracing::debug!(
            components = ?registry.names(),
            capacity = self.capacity,
            max_entities = ?self.max_entities,
            "built ECS system"
        );

        let limit = self.max_entities.unwrap_or(u32::MAX);
        Ok(System {
            registry,
            entities: EntityStore::with_limit(self.capacity, limit),
            columns,
            hooks: Rc::from(Vec::new()),
        })
    }
}

/// The ECS runtime - entities, component columns, queries and hooks.
///
/// The component list is fixed at construction (see [`SystemBuilder`]).
/// Every handle-taking method checks the handle and reports
/// [`EcsError::InvalidHandle`] or [`EcsError::NotAlive`] instead of
/// touching memory it does not own.
///
/// # Example
///
/// ```rust
/// use maskecs_core::{Component, System};
///
/// #[derive(Default)]
/// struct A;
/// impl Component for A {}
/// #[derive(Default)]
/// struct B;
/// impl Component for B {}
///
/// let mut system = System::builder().with_component::<A>().with_component::<B>().build()?;
/// let a = system.spawn_entity()?;
/// let ab = system.spawn_entity()?;
/// system.enable_components::<(A,)>(a)?;
/// system.enable_components::<(A, B)>(ab)?;
///
/// assert_eq!(system.query::<(A,)>()?, vec![a, ab]);
/// assert_eq!(system.query::<(A, B)>()?, vec![ab]);
/// # Ok::<(), maskecs_core::EcsError>(())
/// ```
pub struct System {
    registry: TypeRegistry,
    entities: EntityStore,
    /// One column per registry index.
    columns: Vec<Box<dyn Column>>,
    hooks: HookList,
}

impl System {
    /// Starts building a system.
    #[must_use]
    pub fn builder() -> SystemBuilder {
        SystemBuilder::new()
    }

    // =========================================================================
    // Entity lifecycle
    // =========================================================================

    /// Spawns an entity and returns its handle.
    ///
    /// Recycles the most recently killed handle if there is one; otherwise
    /// allocates a new handle and grows every column by one default slot.
    ///
    /// # Errors
    ///
    /// [`EcsError::HandlesExhausted`] once the handle limit set with
    /// [`SystemBuilder::with_max_entities`] is reached and nothing is free.
    pub fn spawn_entity(&mut self) -> EcsResult<EntityId> {
        let id = self.entities.spawn()?;

        for column in &mut self.columns {
            if column.len() == id.slot() {
                column.push_default();
            }
            debug_assert_eq!(column.len(), self.entities.len());
        }

        Ok(id)
    }

    /// Kills a live entity.
    ///
    /// Its mask is cleared and every component slot is reset to default, so
    /// the handle comes back empty when recycled.
    ///
    /// # Errors
    ///
    /// [`EcsError::InvalidHandle`] or [`EcsError::NotAlive`] (e.g. double kill).
    pub fn kill(&mut self, id: EntityId) -> EcsResult<()> {
        self.entities.kill(id)?;
        for column in &mut self.columns {
            column.reset(id.slot());
        }
        Ok(())
    }

    /// Checks if an entity is alive. Unknown handles are not alive.
    #[must_use]
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.entities.is_alive(id)
    }

    /// Number of handles ever allocated, alive or dead.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Number of currently alive entities.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.entities.alive_count()
    }

    // =========================================================================
    // Component masks and queries
    // =========================================================================

    /// Marks every component in `S` as present on `id`.
    ///
    /// Enabling an already-enabled component changes nothing. Slot contents
    /// are left as they are.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnregisteredComponent`], [`EcsError::InvalidHandle`] or
    /// [`EcsError::NotAlive`]. On error the mask is unchanged.
    pub fn enable_components<S: ComponentSet>(&mut self, id: EntityId) -> EcsResult<()> {
        let mask = self.registry.mask_of::<S>()?;
        let entity = self.entities.get_alive_mut(id)?;
        entity.component_mask |= mask;
        tracing::trace!(%id, mask = entity.component_mask, "enabled components");
        Ok(())
    }

    /// Returns `true` if `id` is alive and has `C` enabled.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnregisteredComponent`] or [`EcsError::InvalidHandle`].
    pub fn has_component<C: Component>(&self, id: EntityId) -> EcsResult<bool> {
        let index = self.registry.index_of::<C>()?;
        let entity = self.entities.get(id)?;
        Ok(entity.alive && entity.has_component(index))
    }

    /// Returns the component mask of a live entity.
    ///
    /// # Errors
    ///
    /// [`EcsError::InvalidHandle`] or [`EcsError::NotAlive`].
    pub fn mask(&self, id: EntityId) -> EcsResult<u64> {
        let entity = self.entities.get(id)?;
        if entity.alive {
            Ok(entity.component_mask)
        } else {
            Err(EcsError::NotAlive(id))
        }
    }

    /// Returns every alive entity that has all components in `S`, in
    /// ascending handle order.
    ///
    /// This is a linear scan over every handle ever allocated; nothing is
    /// cached between calls. `query::<()>()` returns all alive entities.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnregisteredComponent`] if `S` names an unknown type.
    pub fn query<S: ComponentSet>(&self) -> EcsResult<Vec<EntityId>> {
        let mask = self.registry.mask_of::<S>()?;
        Ok(self
            .entities
            .iter()
            .filter(|(_, entity)| entity.matches(mask))
            .map(|(id, _)| id)
            .collect())
    }

    // =========================================================================
    // Component access
    // =========================================================================

    /// Mutable access to the `C` slot of a live entity.
    ///
    /// Presence is not checked: the slot exists whether or not `C` is enabled.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnregisteredComponent`], [`EcsError::InvalidHandle`] or
    /// [`EcsError::NotAlive`].
    pub fn component<C: Component>(&mut self, id: EntityId) -> EcsResult<&mut C> {
        self.check_alive(id)?;
        let len = self.entities.len();
        self.storage_mut::<C>()?
            .get_mut(id.slot())
            .ok_or(EcsError::InvalidHandle {
                index: id.index(),
                len,
            })
    }

    /// Shared access to the `C` slot of a live entity.
    ///
    /// # Errors
    ///
    /// Same as [`System::component`].
    pub fn component_ref<C: Component>(&self, id: EntityId) -> EcsResult<&C> {
        self.check_alive(id)?;
        self.storage::<C>()?
            .get(id.slot())
            .ok_or(EcsError::InvalidHandle {
                index: id.index(),
                len: self.entities.len(),
            })
    }

    /// The whole `C` column, indexed by handle.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnregisteredComponent`].
    pub fn storage<C: Component>(&self) -> EcsResult<&ComponentStorage<C>> {
        let index = self.registry.index_of::<C>()?;
        self.columns[usize::from(index)]
            .as_any()
            .downcast_ref::<ComponentStorage<C>>()
            .ok_or(EcsError::UnregisteredComponent {
                name: type_name::<C>(),
            })
    }

    /// The whole `C` column, mutably.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnregisteredComponent`].
    pub fn storage_mut<C: Component>(&mut self) -> EcsResult<&mut ComponentStorage<C>> {
        let index = self.registry.index_of::<C>()?;
        self.columns[usize::from(index)]
            .as_any_mut()
            .downcast_mut::<ComponentStorage<C>>()
            .ok_or(EcsError::UnregisteredComponent {
                name: type_name::<C>(),
            })
    }

    /// Number of slots in the `C` column; equals [`System::entity_count`].
    ///
    /// # Errors
    ///
    /// [`EcsError::UnregisteredComponent`].
    pub fn column_len<C: Component>(&self) -> EcsResult<usize> {
        Ok(self.storage::<C>()?.len())
    }

    /// Number of registered component types.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.registry.len()
    }

    /// The component registry of this system.
    #[must_use]
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    fn check_alive(&self, id: EntityId) -> EcsResult<()> {
        if self.entities.get(id)?.alive {
            Ok(())
        } else {
            Err(EcsError::NotAlive(id))
        }
    }

    // =========================================================================
    // Update hooks
    // =========================================================================

    /// Replaces the hook list wholesale.
    ///
    /// Called from inside a running hook, the new list is what any later
    /// [`System::update`] runs, nested ones included; the running update
    /// finishes the old list.
    pub fn set_update_hooks(&mut self, hooks: Vec<Box<dyn UpdateHook>>) {
        tracing::debug!(
            hooks = ?hooks.iter().map(|h| h.name()).collect::<Vec<_>>(),
            "replaced update hooks"
        );
        self.hooks = hooks.into_iter().map(RefCell::new).collect();
    }

    /// Number of registered hooks.
    #[must_use]
    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    /// Runs every hook once, in registration order.
    ///
    /// Each hook sees everything the previous hooks did. Handles taken from a
    /// [`System::query`] before a hook spawns stay valid; references do not
    /// survive, the borrow checker sees to that.
    ///
    /// A hook may call `update` itself. The nested update skips every hook
    /// that is still running further up the stack.
    ///
    /// # Errors
    ///
    /// The first hook error; the remaining hooks of this update are skipped.
    pub fn update(&mut self) -> EcsResult<()> {
        let hooks = Rc::clone(&self.hooks);

        for cell in &*hooks {
            let Ok(mut hook) = cell.try_borrow_mut() else {
                tracing::trace!("skipping hook already running");
                continue;
            };
            if let Err(err) = hook.run(self) {
                tracing::warn!(hook = hook.name(), error = %err, "update hook failed");
                return Err(err);
            }
        }
        Ok(())
    }
}

impl fmt::Debug for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("System")
            .field(
                "columns",
                &self
                    .columns
                    .iter()
                    .map(|c| c.component_name())
                    .collect::<Vec<_>>(),
            )
            .field("entities", &self.entities.len())
            .field("alive", &self.entities.alive_count())
            .field(
                "hooks",
                &self
                    .hooks
                    .iter()
                    .map(|cell| {
                        cell.try_borrow()
                            .map_or_else(|_| "<running>".to_owned(), |h| h.name().to_owned())
                    })
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
