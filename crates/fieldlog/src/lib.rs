//! # fieldlog
//!
//! Log collection for IoT endpoints: records produced on the device are kept
//! in bounded memory, uploaded to the platform in buckets, and dropped only
//! once the platform acknowledged them.
//!
//! ## Overview
//!
//! - **Storage** ([`store`]): an ordered record buffer with a byte ceiling,
//!   a claim/confirm/retract protocol keyed by bucket id, and counters for the
//!   still-pending subset.
//! - **Collector** ([`LogCollector`]): allocates bucket ids, asks an
//!   [`UploadStrategy`] when to upload, fills buckets up to the message
//!   budget, and maps delivery outcomes and timeouts back onto storage.
//!
//! ## Usage
//!
//! ```rust
//! use std::time::Instant;
//! use fieldlog::{CollectorConfig, LogCollector, RecordBuffer, TracingLogger, UploadDecision};
//!
//! let config = CollectorConfig::from_json_str(
//!     r#"{"storage": {"max_size": 65536}, "upload": {"count_threshold": 2}}"#,
//! )
//! .unwrap();
//! let mut collector = LogCollector::from_config(TracingLogger::shared("logs"), &config).unwrap();
//!
//! collector.add_record(RecordBuffer::from(b"boot".to_vec())).unwrap();
//! let decision = collector.add_record(RecordBuffer::from(b"online".to_vec())).unwrap();
//! assert_eq!(decision, UploadDecision::Upload);
//!
//! let bucket = collector.prepare_bucket(Instant::now()).unwrap().unwrap();
//! assert_eq!(bucket.records.len(), 2);
//!
//! // ... send the bucket, then report the outcome:
//! collector.on_delivery_success(bucket.id).unwrap();
//! assert!(collector.storage().is_empty());
//! ```
//!
//! ## Re-exports
//!
//! - `fieldlog::core` - Bucket ids, record buffers, errors, logger seam
//! - `fieldlog::store` - Storage trait and in-memory engine

pub mod collector;
pub mod config;
pub mod error;
pub mod strategy;

// Re-export component crates
pub use fieldlog_core as core;
pub use fieldlog_store as store;

// Re-export main types for convenience
pub use collector::{BucketAllocator, LogBucket, LogCollector};
pub use config::{CollectorConfig, UploadConfig};
pub use error::{CollectorError, Result};
pub use strategy::{UploadDecision, UploadStrategy, VolumeThresholdStrategy};

pub use fieldlog_core::{
    BucketId, ErrorKind, LogLevel, Logger, RecordBuffer, SharedLogger, StorageError, TracingLogger,
};
pub use fieldlog_store::{LogStorage, MemoryLogStorage, StorageConfig, StorageStatus};
