//! # MASKECS Core
//!
//! A small entity component system built around one idea: every entity
//! carries a 64-bit mask, and a query is a superset test against that mask.
//!
//! ## Architecture
//!
//! 1. **Entities are dense handles** - killed handles are recycled LIFO
//! 2. **One column per component type** - slot `h` of every column belongs to entity `h`
//! 3. **Registry fixed at construction** - at most 64 distinct component types
//!
//! ## Example
//!
//! ```rust
//! use maskecs_core::{Component, System};
//!
//! #[derive(Clone, Copy, Debug, Default, PartialEq)]
//! struct Health(u32);
//! impl Component for Health {}
//!
//! let mut system = System::builder().with_component::<Health>().build()?;
//! let player = system.spawn_entity()?;
//! system.enable_components::<(Health,)>(player)?;
//! *system.component::<Health>(player)? = Health(100);
//!
//! assert_eq!(system.query::<(Health,)>()?, vec![player]);
//! # Ok::<(), maskecs_core::EcsError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod bits;
pub mod ecs;
mod error;

pub use ecs::{
    Component, ComponentSet, ComponentStorage, Entity, EntityId, EntityStore, System,
    SystemBuilder, TypeRegistry, UpdateHook, MAX_COMPONENTS,
};
pub use error::{EcsError, EcsResult};
