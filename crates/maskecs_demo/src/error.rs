//! # Demo Error Types

use maskecs_core::EcsError;
use thiserror::Error;

/// Errors that can stop the demo.
#[derive(Error, Debug)]
pub enum DemoError {
    /// The ECS runtime rejected an operation.
    #[error(transparent)]
    Ecs(#[from] EcsError),

    /// The config file could not be read.
    #[error("cannot read config {path}: {source}")]
    ConfigIo {
        /// Path that was requested.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`DemoConfig`](crate::config::DemoConfig).
    #[error("invalid configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A config value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The query engine disagreed with the population the demo built.
    #[error("self-check failed: expected {expected} matching entities, query returned {found}")]
    SelfCheck {
        /// Entities the demo gave all components to.
        expected: usize,
        /// Entities the query returned.
        found: usize,
    },
}

/// Result type for demo operations.
pub type DemoResult<T> = Result<T, DemoError>;
