//! # Demo Configuration
//!
//! Loaded once at startup from a TOML file. Every key is optional.
//!
//! ```toml
//! entity_count = 100
//! ticks = 10
//! tick_rate_hz = 30
//! seed = 42
//! draw_limit = 5
//! log_level = "info"
//! ```

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use tracing::Level;

use crate::error::{DemoError, DemoResult};

/// Settings for one demo run.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    /// Entities spawned before the loop starts.
    pub entity_count: u32,
    /// Number of `update()` calls.
    pub ticks: u32,
    /// Fixed update rate.
    pub tick_rate_hz: u32,
    /// Seed deciding which entities get components.
    pub seed: u64,
    /// Drawable entities printed per frame.
    pub draw_limit: usize,
    /// Max tracing level: trace, debug, info, warn or error.
    pub log_level: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            entity_count: 100,
            ticks: 10,
            tick_rate_hz: 30,
            seed: 42,
            draw_limit: 5,
            log_level: "info".to_owned(),
        }
    }
}

impl DemoConfig {
    /// Reads the config at `path`, or returns the defaults when `path` is `None`.
    ///
    /// # Errors
    ///
    /// I/O failures, malformed TOML, or values rejected by [`DemoConfig::validate`].
    pub fn load(path: Option<&Path>) -> DemoResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path).map_err(|source| DemoError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Malformed TOML, unknown keys, or values rejected by [`DemoConfig::validate`].
    pub fn from_toml(text: &str) -> DemoResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// [`DemoError::InvalidConfig`] for a zero tick rate or an unknown log level.
    pub fn validate(&self) -> DemoResult<()> {
        if self.tick_rate_hz == 0 {
            return Err(DemoError::InvalidConfig(
                "tick_rate_hz must be at least 1".to_owned(),
            ));
        }
        self.level()?;
        Ok(())
    }

    /// The configured tracing level.
    ///
    /// # Errors
    ///
    /// [`DemoError::InvalidConfig`] if `log_level` is not a tracing level.
    pub fn level(&self) -> DemoResult<Level> {
        Level::from_str(&self.log_level).map_err(|_| {
            DemoError::InvalidConfig(format!("unknown log_level {:?}", self.log_level))
        })
    }

    /// Time budget of one tick.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate_hz.max(1)
    }
}
