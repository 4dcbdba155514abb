//! Error types for the log collector.

use fieldlog_core::{BucketId, ErrorKind, StorageError};
use thiserror::Error;

/// Errors that can occur during log collection.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// Storage error.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The oldest pending record cannot fit into one bucket.
    #[error("record of {required} bytes does not fit into a bucket of {bucket_size} bytes")]
    BucketTooSmall { required: usize, bucket_size: usize },

    /// Every bucket id is waiting on a delivery outcome.
    #[error("no free bucket id: {in_flight} buckets in flight")]
    NoFreeBucketId { in_flight: usize },

    /// Bucket is not waiting on a delivery outcome.
    #[error("bucket {0} is not in flight")]
    UnknownBucket(BucketId),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),
}

impl CollectorError {
    /// The underlying storage error kind, if this wraps one.
    pub fn storage_kind(&self) -> Option<ErrorKind> {
        match self {
            CollectorError::Storage(e) => Some(e.kind()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CollectorError {
    fn from(e: serde_json::Error) -> Self {
        CollectorError::Config(e.to_string())
    }
}

impl From<std::io::Error> for CollectorError {
    fn from(e: std::io::Error) -> Self {
        CollectorError::Config(e.to_string())
    }
}

/// Result type for collector operations.
pub type Result<T> = std::result::Result<T, CollectorError>;
