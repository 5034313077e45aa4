//! # ECS Error Types
//!
//! All errors that can occur while building or driving a [`System`](crate::System).

use crate::ecs::EntityId;
use thiserror::Error;

/// Errors that can occur in the ECS runtime.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// The same component type was registered twice.
    #[error("component registered twice: {name}")]
    DuplicateComponent {
        /// Type name of the duplicated component.
        name: &'static str,
    },

    /// More component types were registered than fit in one mask.
    #[error("too many component types: {count} registered, at most 64 fit in a mask")]
    TooManyComponents {
        /// Number of types that were registered.
        count: usize,
    },

    /// A component type was used that is not part of this system's registry.
    #[error("component not registered: {name}")]
    UnregisteredComponent {
        /// Type name of the unknown component.
        name: &'static str,
    },

    /// A handle outside the range of allocated handles.
    #[error("invalid handle {index}: only {len} handles allocated")]
    InvalidHandle {
        /// The raw handle index.
        index: u32,
        /// Number of handles allocated so far.
        len: usize,
    },

    /// No handle is free and the handle limit is reached.
    #[error("entity handle limit of {limit} reached")]
    HandlesExhausted {
        /// The configured limit.
        limit: u32,
    },

    /// The handle refers to a dead entity (e.g. killed twice).
    #[error("{0} is not alive")]
    NotAlive(EntityId),

    /// An update hook failed for a reason of its own.
    #[error("hook {hook} failed: {reason}")]
    Hook {
        /// Name of the failing hook.
        hook: String,
        /// Why it failed.
        reason: String,
    },
}

/// Result type for ECS operations.
pub type EcsResult<T> = Result<T, EcsError>;
