use serde::{Deserialize, Serialize};

use super::defaults;

/// Closure memory configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClosureConfig {
    /// Ring buffer capacity; oldest records are evicted beyond this.
    pub capacity: usize,
    /// SQLite file for the durable mirror. In-memory only when unset.
    pub durable_path: Option<String>,
}

impl Default for ClosureConfig {
    fn default() -> Self {
        Self {
            capacity: defaults::DEFAULT_CLOSURE_CAPACITY,
            durable_path: None,
        }
    }
}
