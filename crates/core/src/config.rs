//! Stack capacity configuration
//!
//! Both buffers are allocated once, up front, and never grow: running out
//! of room is fatal. Provision generously.
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `FLATSTACK_DATA_CAPACITY` | `4194304` | Payload bytes |
//! | `FLATSTACK_SHAPE_CAPACITY` | `1048576` | Shape nodes |
//!
//! ## Config File
//!
//! ```toml
//! data_capacity = 65536
//! shape_capacity = 16384
//! ```
//!
//! The two sizes are independent: all-scalar data needs one shape node per
//! 4-8 payload bytes, but deeply nested aggregates need more shape nodes.

use serde::Deserialize;
use std::path::Path;

/// Default payload capacity in bytes (4 MiB)
pub const DEFAULT_DATA_CAPACITY: usize = 4 * 1024 * 1024;

/// Default shape capacity in nodes
pub const DEFAULT_SHAPE_CAPACITY: usize = 1024 * 1024;

pub const DATA_CAPACITY_VAR: &str = "FLATSTACK_DATA_CAPACITY";
pub const SHAPE_CAPACITY_VAR: &str = "FLATSTACK_SHAPE_CAPACITY";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StackConfig {
    /// Payload bytes available to scalar values
    pub data_capacity: usize,
    /// Shape nodes available, not counting the bottom sentinel
    pub shape_capacity: usize,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            data_capacity: DEFAULT_DATA_CAPACITY,
            shape_capacity: DEFAULT_SHAPE_CAPACITY,
        }
    }
}

impl StackConfig {
    pub fn new() -> Self {
        StackConfig::default()
    }

    pub fn with_data_capacity(mut self, bytes: usize) -> Self {
        self.data_capacity = bytes;
        self
    }

    pub fn with_shape_capacity(mut self, nodes: usize) -> Self {
        self.shape_capacity = nodes;
        self
    }

    /// Load configuration from environment variables
    ///
    /// Missing, unparseable, or zero values keep their defaults.
    pub fn from_env() -> Self {
        let data_capacity = std::env::var(DATA_CAPACITY_VAR)
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .filter(|&v| v > 0)
            .unwrap_or(DEFAULT_DATA_CAPACITY);

        let shape_capacity = std::env::var(SHAPE_CAPACITY_VAR)
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .filter(|&v| v > 0)
            .unwrap_or(DEFAULT_SHAPE_CAPACITY);

        Self {
            data_capacity,
            shape_capacity,
        }
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse stack config: {}", e))
    }

    /// Read and parse a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_toml(&content)
    }
}
