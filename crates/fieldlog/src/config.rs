//! Collector configuration.

use std::path::Path;
use std::time::Duration;

use fieldlog_store::StorageConfig;
use serde::{Deserialize, Serialize};

use crate::error::{CollectorError, Result};

/// When to upload and how large one bucket may be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Upload once this many bytes are pending.
    pub volume_threshold: usize,
    /// Upload once this many records are pending.
    pub count_threshold: usize,
    /// Byte budget of one bucket (one outgoing log message).
    pub bucket_size: usize,
    /// Seconds to wait for a delivery outcome before retracting a bucket.
    pub upload_timeout_secs: u64,
}

impl UploadConfig {
    /// Upload timeout as a duration.
    pub fn upload_timeout(&self) -> Duration {
        Duration::from_secs(self.upload_timeout_secs)
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            volume_threshold: 8 * 1024,
            count_threshold: 64,
            bucket_size: 16 * 1024,
            upload_timeout_secs: 120,
        }
    }
}

/// Configuration for a [`LogCollector`](crate::LogCollector).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Storage ceiling and eviction share.
    pub storage: StorageConfig,
    /// Upload thresholds and bucket sizing.
    pub upload: UploadConfig,
}

impl CollectorConfig {
    /// Parse configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check values the storage and collector cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.storage.percent_to_delete > 100 {
            return Err(CollectorError::Config(format!(
                "storage.percent_to_delete must be in 0..=100, got {}",
                self.storage.percent_to_delete
            )));
        }
        if self.upload.bucket_size == 0 {
            return Err(CollectorError::Config("upload.bucket_size must be non-zero".into()));
        }
        Ok(())
    }
}
