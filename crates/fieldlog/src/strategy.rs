//! Upload strategies: when the pending log volume is worth a bucket.

use fieldlog_store::StorageStatus;

use crate::config::UploadConfig;

/// What the collector should do after a record was added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadDecision {
    /// Keep accumulating.
    Noop,
    /// Prepare and send a bucket now.
    Upload,
}

/// Decides when pending records should be uploaded.
pub trait UploadStrategy: Send {
    /// Decide from the pending subset whether to upload now.
    fn decide(&self, status: &StorageStatus) -> UploadDecision;
}

/// Uploads once pending records reach a byte volume or a record count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeThresholdStrategy {
    /// Pending bytes at which an upload is due.
    pub volume_threshold: usize,
    /// Pending record count at which an upload is due.
    pub count_threshold: usize,
}

impl VolumeThresholdStrategy {
    /// Create a strategy with explicit thresholds.
    pub fn new(volume_threshold: usize, count_threshold: usize) -> Self {
        Self {
            volume_threshold,
            count_threshold,
        }
    }

    /// Take both thresholds from the upload configuration.
    pub fn from_config(config: &UploadConfig) -> Self {
        Self::new(config.volume_threshold, config.count_threshold)
    }
}

impl UploadStrategy for VolumeThresholdStrategy {
    fn decide(&self, status: &StorageStatus) -> UploadDecision {
        if status.unmarked_count == 0 {
            return UploadDecision::Noop;
        }
        if status.unmarked_size >= self.volume_threshold
            || status.unmarked_count >= self.count_threshold
        {
            UploadDecision::Upload
        } else {
            UploadDecision::Noop
        }
    }
}
