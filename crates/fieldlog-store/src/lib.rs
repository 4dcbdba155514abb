//! # fieldlog store
//!
//! Storage for serialized log records on their way to the platform.
//!
//! ## Overview
//!
//! Producers hand records to a [`LogStorage`] as owned [`RecordBuffer`]s. The
//! upload side claims pending records one at a time into a bucket it names,
//! sends the bucket, and then either confirms it (the records are dropped) or
//! retracts it (the records become pending again and go out in a later
//! bucket).
//!
//! ## Key Types
//!
//! - [`LogStorage`] - The storage trait the log collector is written against
//! - [`MemoryLogStorage`] - In-memory storage with an optional byte ceiling
//! - [`StorageConfig`] - Ceiling and eviction share
//! - [`RecordInfo`] - Read-only view of a stored record
//!
//! ## Usage
//!
//! ```rust
//! use fieldlog_core::{BucketId, RecordBuffer, TracingLogger};
//! use fieldlog_store::MemoryLogStorage;
//!
//! let mut storage = MemoryLogStorage::limited(TracingLogger::shared("logs"), 4096, 50).unwrap();
//! storage.add(RecordBuffer::from(b"temperature=21.5".to_vec())).unwrap();
//!
//! let bucket = BucketId::new(1).unwrap();
//! let mut out = [0u8; 64];
//! let len = storage.claim_next(&mut out, bucket).unwrap();
//! assert_eq!(&out[..len], b"temperature=21.5");
//!
//! // Upload succeeded.
//! storage.confirm(bucket).unwrap();
//! assert!(storage.is_empty());
//! ```
//!
//! ## Design Notes
//!
//! - **Eviction ignores claim state**: when the ceiling is hit, the oldest
//!   records go first even if a bucket is waiting on them. A later
//!   confirm/retract for that bucket then reports `NotFound`.
//! - **Counters report the pending subset**: `unmarked_total_size` and
//!   `unmarked_record_count` describe what the next bucket can claim.
//! - **Single owner**: no internal locking; mutation needs `&mut self`.

pub mod config;
pub mod memory;
pub mod traits;

pub use config::{StorageConfig, DEFAULT_PERCENT_TO_DELETE};
pub use fieldlog_core::{BucketId, ErrorKind, RecordBuffer, Result, StorageError};
pub use memory::{MemoryLogStorage, RecordInfo};
pub use traits::{LogStorage, StorageStatus};
