//! Storage configuration.

use serde::{Deserialize, Serialize};

/// Default share of the ceiling to free when storage overflows.
pub const DEFAULT_PERCENT_TO_DELETE: u8 = 60;

/// Configuration for the in-memory log storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Byte ceiling for all stored records. Zero means unlimited.
    pub max_size: usize,
    /// Percentage of `max_size` to free, oldest records first, when a new
    /// record would overflow the ceiling.
    pub percent_to_delete: u8,
}

impl StorageConfig {
    /// Unlimited storage.
    pub fn unlimited() -> Self {
        Self {
            max_size: 0,
            percent_to_delete: DEFAULT_PERCENT_TO_DELETE,
        }
    }

    /// Storage capped at `max_size` bytes.
    pub fn limited(max_size: usize, percent_to_delete: u8) -> Self {
        Self {
            max_size,
            percent_to_delete,
        }
    }

    /// Whether a ceiling is configured.
    pub fn is_limited(&self) -> bool {
        self.max_size > 0
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::unlimited()
    }
}
