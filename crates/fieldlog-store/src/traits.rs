//! LogStorage trait: the interface between log producers, the upload side and
//! a storage backend.
//!
//! The log collector is generic over this trait, so a backend other than the
//! in-memory one can be plugged in without touching upload logic.

use fieldlog_core::{BucketId, RecordBuffer, Result};

/// Aggregate view of the records still eligible for upload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StorageStatus {
    /// Total bytes of pending (unclaimed) records.
    pub unmarked_size: usize,
    /// Number of pending (unclaimed) records.
    pub unmarked_count: usize,
}

/// Storage for serialized log records awaiting upload.
///
/// # Record lifecycle
///
/// ```text
///   add ──> pending ──claim_next(b)──> claimed(b) ──confirm(b)──> removed
///              ^                           │
///              └────────retract(b)─────────┘
/// ```
///
/// A backend with a size ceiling may also remove the oldest records, in any
/// state, to make room for a new one.
///
/// All methods take `&mut self` for mutation; callers sharing one storage
/// across threads must serialize access themselves.
pub trait LogStorage {
    /// Take ownership of a record and store it as pending.
    fn add(&mut self, record: RecordBuffer) -> Result<()>;

    /// Copy the oldest pending record into `out` and claim it for `bucket`.
    ///
    /// Returns the number of bytes written. On `InsufficientBuffer` the record
    /// stays pending.
    fn claim_next(&mut self, out: &mut [u8], bucket: BucketId) -> Result<usize>;

    /// Remove every record claimed for `bucket`.
    fn confirm(&mut self, bucket: BucketId) -> Result<()>;

    /// Return every record claimed for `bucket` to the pending state.
    fn retract(&mut self, bucket: BucketId) -> Result<()>;

    /// Total bytes of pending records.
    fn unmarked_total_size(&self) -> usize;

    /// Number of pending records.
    fn unmarked_record_count(&self) -> usize;

    /// Size of the oldest pending record, if any.
    ///
    /// Lets the upload side size its buffer before claiming.
    fn next_record_size(&self) -> Option<usize>;

    /// Snapshot of the pending subset.
    fn status(&self) -> StorageStatus {
        StorageStatus {
            unmarked_size: self.unmarked_total_size(),
            unmarked_count: self.unmarked_record_count(),
        }
    }
}
