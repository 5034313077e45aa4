//! # Entity Component System
//!
//! A bitmask ECS with column-per-type storage.
//!
//! ## Design Philosophy
//!
//! - Entity handles are dense indices, recycled most-recently-killed first
//! - Each component type owns a dense column, index-aligned with the entities
//! - Presence lives in one `u64` mask per entity; a query is a superset test
//! - The component list is validated once, when the system is built

mod component;
mod entity;
mod registry;
mod storage;
mod system;

pub use component::{Component, ComponentSet};
pub use entity::{Entity, EntityId, EntityStore};
pub use registry::{TypeRegistry, MAX_COMPONENTS};
pub use storage::ComponentStorage;
pub use system::{System, SystemBuilder, UpdateHook};
