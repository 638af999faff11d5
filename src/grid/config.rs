//! Grid traversal-cost parameters.

use serde::{Deserialize, Serialize};

/// Parameters of the grid edge-cost model.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GridCostConfig {
    /// Constant added to every edge cost, so even a move between two
    /// free cells costs something.
    ///
    /// Keeps path lengths meaningful on all-zero maps and acts as a
    /// tie-breaker toward shorter paths.
    #[serde(default = "default_traversal_offset")]
    pub traversal_offset: f32,

    /// Cell values at or above this threshold are untraversable.
    ///
    /// The default of 128 treats the upper half of the byte range as
    /// blocked; 255 ([`OBSTACLE`](super::OBSTACLE)) is the canonical
    /// blocked value.
    #[serde(default = "default_obstacle_threshold")]
    pub obstacle_threshold: u8,
}

fn default_traversal_offset() -> f32 {
    1.0
}

fn default_obstacle_threshold() -> u8 {
    128
}

impl Default for GridCostConfig {
    fn default() -> Self {
        Self {
            traversal_offset: default_traversal_offset(),
            obstacle_threshold: default_obstacle_threshold(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GridCostConfig::default();
        assert_eq!(config.traversal_offset, 1.0);
        assert_eq!(config.obstacle_threshold, 128);
    }

    #[test]
    fn test_partial_toml() {
        let config: GridCostConfig = toml::from_str("traversal_offset = 0.5").unwrap();
        assert_eq!(config.traversal_offset, 0.5);
        assert_eq!(config.obstacle_threshold, 128);
    }
}
