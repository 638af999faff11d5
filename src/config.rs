//! Crate-level configuration loading.
//!
//! All planners work with in-code defaults; deployments that tune the
//! cost model per robot load a single TOML file instead:
//!
//! ```toml
//! [grid]
//! traversal_offset = 1.0
//! obstacle_threshold = 128
//!
//! [astar]
//! max_expansions = 100000
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::astar::AStarConfig;
use crate::grid::GridCostConfig;

/// Error loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Unified planner configuration.
///
/// Every section falls back to its defaults when absent, so an empty
/// file (or no file at all) is a valid configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Grid edge-cost model.
    #[serde(default)]
    pub grid: GridCostConfig,

    /// One-shot A* settings.
    #[serde(default)]
    pub astar: AStarConfig,
}

impl PlanConfig {
    /// Load configuration from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}
