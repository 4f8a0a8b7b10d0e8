//! Engine configuration, loadable from TOML.
//!
//! Every field has a default, so a file only needs the values it changes:
//!
//! ```toml
//! depth = 6
//!
//! [transposition]
//! enabled = false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Iterative-deepening target depth in plies
    pub depth: u32,
    /// Quiescence budget, restored after every capture or promotion
    pub quiescence_depth: u32,
    /// Emit an `info nodes` line every this many nodes (0 disables it)
    pub info_interval_nodes: u64,
    pub transposition: TranspositionConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: 4,
            quiescence_depth: 8,
            info_interval_nodes: 100_000,
            transposition: TranspositionConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

/// Transposition table sizing and the tree depths it works at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranspositionConfig {
    pub enabled: bool,
    /// Number of home slots; `hash % capacity` picks the first probe
    pub capacity: usize,
    /// Extra slots past the last home slot for forward probing
    pub slack: usize,
    /// Lookups below this tree depth are skipped
    pub min_probe_depth: u32,
    pub min_store_depth: u32,
    pub max_store_depth: u32,
}

impl Default for TranspositionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: 1 << 20,
            slack: 1000,
            min_probe_depth: 3,
            min_store_depth: 3,
            max_store_depth: 6,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
