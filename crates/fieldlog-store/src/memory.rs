//! In-memory implementation of the LogStorage trait.
//!
//! Records live in a `VecDeque` in arrival order, oldest first. Each record
//! gets a monotonically increasing insertion id; the claim cursor is an id,
//! not a slot index, so popping old records from the front never makes it
//! point at the wrong record.

use std::collections::VecDeque;
use std::fmt;

use fieldlog_core::{BucketId, RecordBuffer, Result, SharedLogger, StorageError};

use crate::config::StorageConfig;
use crate::traits::LogStorage;

/// In-memory log storage with an optional byte ceiling.
///
/// Aggregates kept in step with the record list after every call:
/// - `total_size` is the sum of all record sizes;
/// - `unmarked_size` / `unmarked_count` cover records not claimed by a bucket;
/// - with a ceiling, `total_size <= max_size` once `add` returns `Ok`.
///
/// Every failing call leaves the storage unchanged.
pub struct MemoryLogStorage {
    records: VecDeque<StoredRecord>,

    /// Insertion id of the next record.
    next_id: u64,

    /// Scan for the next pending record starts at the first record whose id
    /// is >= this. Every record before that point is claimed.
    cursor: Option<u64>,

    total_size: usize,
    unmarked_size: usize,
    unmarked_count: usize,

    /// Zero means unlimited.
    max_size: usize,

    /// Size to shrink down to when a new record would overflow `max_size`.
    evict_floor: usize,

    logger: SharedLogger,
}

struct StoredRecord {
    id: u64,
    data: RecordBuffer,
    bucket: Option<BucketId>,
}

impl StoredRecord {
    fn size(&self) -> usize {
        self.data.len()
    }

    fn is_pending(&self) -> bool {
        self.bucket.is_none()
    }
}

/// Read-only view of one stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordInfo {
    /// Insertion id, increasing with age order.
    pub id: u64,
    /// Payload size in bytes.
    pub size: usize,
    /// Bucket the record is claimed for, `None` while pending.
    pub bucket: Option<BucketId>,
}

impl MemoryLogStorage {
    /// Create a storage without a size ceiling.
    pub fn unlimited(logger: SharedLogger) -> Self {
        Self {
            records: VecDeque::new(),
            next_id: 0,
            cursor: None,
            total_size: 0,
            unmarked_size: 0,
            unmarked_count: 0,
            max_size: 0,
            evict_floor: 0,
            logger,
        }
    }

    /// Create a storage capped at `max_size` bytes.
    ///
    /// When a new record would overflow the cap, the oldest records are
    /// removed until at most `max_size * (100 - percent_to_delete) / 100`
    /// bytes remain (and the new record fits).
    pub fn limited(logger: SharedLogger, max_size: usize, percent_to_delete: u8) -> Result<Self> {
        if max_size == 0 {
            return Err(StorageError::BadParam(
                "limited log storage needs a non-zero max size".into(),
            ));
        }
        if percent_to_delete > 100 {
            logger.warn(&format!(
                "failed to create log storage: percentage of logs to remove is more than 100% ({}%)",
                percent_to_delete
            ));
            return Err(StorageError::BadParam(format!(
                "percent to delete must be in 0..=100, got {}",
                percent_to_delete
            )));
        }

        let mut storage = Self::unlimited(logger);
        storage.max_size = max_size;
        storage.evict_floor = evict_floor(max_size, percent_to_delete);
        Ok(storage)
    }

    /// Create a storage from configuration.
    pub fn from_config(logger: SharedLogger, config: &StorageConfig) -> Result<Self> {
        if config.is_limited() {
            Self::limited(logger, config.max_size, config.percent_to_delete)
        } else {
            Ok(Self::unlimited(logger))
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Record Store
    // ─────────────────────────────────────────────────────────────────────────

    /// Take ownership of `record` and append it as pending.
    ///
    /// With a ceiling configured, the oldest records (claimed or not) may be
    /// removed first to make room.
    ///
    /// # Errors
    ///
    /// - `BadParam` for an empty record, or for a record larger than the
    ///   configured `max_size` (it could never fit without breaking the
    ///   ceiling). Nothing is evicted in either case.
    /// - `NoMemory` if the record slot cannot be reserved.
    pub fn add(&mut self, record: RecordBuffer) -> Result<()> {
        let size = record.len();
        if size == 0 {
            return Err(StorageError::BadParam("log record is empty".into()));
        }
        if self.max_size > 0 && size > self.max_size {
            return Err(StorageError::BadParam(format!(
                "log record of {} bytes exceeds storage max size {}",
                size, self.max_size
            )));
        }

        // Reserve before evicting so a failed reservation changes nothing.
        self.records.try_reserve(1)?;
        self.enforce_before_insert(size);

        let id = self.next_id;
        self.next_id += 1;
        self.records.push_back(StoredRecord {
            id,
            data: record,
            bucket: None,
        });

        self.total_size += size;
        self.unmarked_size += size;
        self.unmarked_count += 1;

        Ok(())
    }

    fn remove_oldest(&mut self) -> Option<StoredRecord> {
        let record = self.records.pop_front()?;
        self.total_size -= record.size();
        if record.is_pending() {
            self.unmarked_size -= record.size();
            self.unmarked_count -= 1;
        }
        Some(record)
    }

    /// Whether no records are stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of stored records, claimed or not.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Bytes occupied by all stored records, claimed or not.
    pub fn total_size(&self) -> usize {
        self.total_size
    }

    /// Configured ceiling; zero when unlimited.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Size the storage shrinks to when it overflows.
    pub fn evict_floor(&self) -> usize {
        self.evict_floor
    }

    /// Stored records, oldest first.
    pub fn records(&self) -> impl Iterator<Item = RecordInfo> + '_ {
        self.records.iter().map(|r| RecordInfo {
            id: r.id,
            size: r.size(),
            bucket: r.bucket,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Capacity Enforcer
    // ─────────────────────────────────────────────────────────────────────────

    fn enforce_before_insert(&mut self, incoming: usize) {
        if self.max_size == 0 || self.total_size.saturating_add(incoming) <= self.max_size {
            return;
        }

        self.logger.info(&format!(
            "log storage is full (occupied {}, max {}, record size {}), going to delete elder logs",
            self.total_size, self.max_size, incoming
        ));

        // `add` has already rejected records larger than the ceiling.
        let target = self.evict_floor.min(self.max_size - incoming);

        let mut removed = 0usize;
        let mut removed_claimed = 0usize;
        while self.total_size > target {
            match self.remove_oldest() {
                Some(record) => {
                    removed += 1;
                    if !record.is_pending() {
                        removed_claimed += 1;
                    }
                }
                None => break,
            }
        }

        if self.records.is_empty() {
            self.cursor = None;
        }

        self.logger.info(&format!(
            "{} records forcibly removed ({} of them claimed by a bucket)",
            removed, removed_claimed
        ));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Delivery Tracker
    // ─────────────────────────────────────────────────────────────────────────

    fn scan_start(&self) -> usize {
        match self.cursor {
            Some(cursor) => self.records.partition_point(|r| r.id < cursor),
            None => 0,
        }
    }

    fn next_pending_index(&self) -> Option<usize> {
        if self.unmarked_count == 0 {
            return None;
        }
        let start = self.scan_start();
        self.records
            .iter()
            .skip(start)
            .position(StoredRecord::is_pending)
            .map(|offset| start + offset)
    }

    /// Copy the oldest pending record into `out` and claim it for `bucket`.
    ///
    /// Returns the record size. Fails with `NotFound` when nothing is pending
    /// and with `InsufficientBuffer` when `out` is too small, in which case
    /// the record stays pending.
    pub fn claim_next(&mut self, out: &mut [u8], bucket: BucketId) -> Result<usize> {
        let index = self
            .next_pending_index()
            .ok_or_else(|| StorageError::NotFound("no pending log records".into()))?;

        let record = &mut self.records[index];
        let size = record.size();
        if size > out.len() {
            return Err(StorageError::InsufficientBuffer {
                required: size,
                available: out.len(),
            });
        }

        out[..size].copy_from_slice(record.data.as_bytes());
        record.bucket = Some(bucket);
        let id = record.id;

        self.cursor = Some(id + 1);
        self.unmarked_size -= size;
        self.unmarked_count -= 1;

        Ok(size)
    }

    /// Remove every record claimed for `bucket`.
    pub fn confirm(&mut self, bucket: BucketId) -> Result<()> {
        let before = self.records.len();
        let mut freed = 0usize;
        self.records.retain(|r| {
            if r.bucket == Some(bucket) {
                freed += r.size();
                false
            } else {
                true
            }
        });

        let removed = before - self.records.len();
        if removed == 0 {
            return Err(StorageError::NotFound(format!(
                "no log records claimed for bucket {}",
                bucket
            )));
        }

        self.total_size -= freed;
        self.cursor = None;

        self.logger.debug(&format!(
            "bucket {} confirmed: {} records ({} bytes) removed",
            bucket, removed, freed
        ));
        Ok(())
    }

    /// Return every record claimed for `bucket` to the pending state.
    pub fn retract(&mut self, bucket: BucketId) -> Result<()> {
        let mut count = 0usize;
        let mut size = 0usize;
        for record in self.records.iter_mut().filter(|r| r.bucket == Some(bucket)) {
            record.bucket = None;
            count += 1;
            size += record.size();
        }

        if count == 0 {
            return Err(StorageError::NotFound(format!(
                "no log records claimed for bucket {}",
                bucket
            )));
        }

        self.unmarked_count += count;
        self.unmarked_size += size;
        // Retracted records may sit before the cursor.
        self.cursor = None;

        self.logger.debug(&format!(
            "bucket {} retracted: {} records ({} bytes) pending again",
            bucket, count, size
        ));
        Ok(())
    }

    /// Bytes of pending records, i.e. what the next upload can claim.
    pub fn unmarked_total_size(&self) -> usize {
        self.unmarked_size
    }

    /// Number of pending records.
    pub fn unmarked_record_count(&self) -> usize {
        self.unmarked_count
    }

    /// Size of the record the next `claim_next` would return.
    pub fn next_record_size(&self) -> Option<usize> {
        self.next_pending_index().map(|i| self.records[i].size())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Buffers and teardown
    // ─────────────────────────────────────────────────────────────────────────

    /// Allocate a zero-filled buffer for a producer to serialize a record into.
    pub fn allocate_payload_buffer(&self, size: usize) -> Result<RecordBuffer> {
        RecordBuffer::allocate(size).map_err(|e| {
            self.logger
                .warn(&format!("failed to allocate {} byte log record buffer: {}", size, e));
            e
        })
    }

    /// Release a buffer obtained from [`allocate_payload_buffer`] or elsewhere.
    ///
    /// [`allocate_payload_buffer`]: Self::allocate_payload_buffer
    pub fn release_payload_buffer(&self, buffer: RecordBuffer) -> Result<()> {
        if buffer.is_empty() {
            return Err(StorageError::BadParam("cannot release an empty buffer".into()));
        }
        drop(buffer);
        Ok(())
    }

    /// Drop every stored record and the storage itself.
    pub fn destroy(self) -> Result<()> {
        self.logger.debug(&format!(
            "destroying log storage with {} records ({} bytes)",
            self.records.len(),
            self.total_size
        ));
        Ok(())
    }
}

fn evict_floor(max_size: usize, percent_to_delete: u8) -> usize {
    let keep = 100 - percent_to_delete as u128;
    (max_size as u128 * keep / 100) as usize
}

impl fmt::Debug for MemoryLogStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryLogStorage")
            .field("records", &self.records.len())
            .field("total_size", &self.total_size)
            .field("unmarked_size", &self.unmarked_size)
            .field("unmarked_count", &self.unmarked_count)
            .field("max_size", &self.max_size)
            .field("evict_floor", &self.evict_floor)
            .finish()
    }
}

impl LogStorage for MemoryLogStorage {
    fn add(&mut self, record: RecordBuffer) -> Result<()> {
        MemoryLogStorage::add(self, record)
    }

    fn claim_next(&mut self, out: &mut [u8], bucket: BucketId) -> Result<usize> {
        MemoryLogStorage::claim_next(self, out, bucket)
    }

    fn confirm(&mut self, bucket: BucketId) -> Result<()> {
        MemoryLogStorage::confirm(self, bucket)
    }

    fn retract(&mut self, bucket: BucketId) -> Result<()> {
        MemoryLogStorage::retract(self, bucket)
    }

    fn unmarked_total_size(&self) -> usize {
        self.unmarked_size
    }

    fn unmarked_record_count(&self) -> usize {
        self.unmarked_count
    }

    fn next_record_size(&self) -> Option<usize> {
        MemoryLogStorage::next_record_size(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldlog_core::{ErrorKind, LogLevel, Logger};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Capture(Mutex<Vec<(LogLevel, String)>>);

    impl Logger for Capture {
        fn log(&self, level: LogLevel, message: &str) {
            self.0.lock().unwrap().push((level, message.to_string()));
        }
    }

    fn logger() -> SharedLogger {
        Arc::new(Capture::default())
    }

    fn record(size: usize, fill: u8) -> RecordBuffer {
        RecordBuffer::from(vec![fill; size])
    }

    fn bucket(raw: u16) -> BucketId {
        BucketId::new(raw).unwrap()
    }

    fn sizes(storage: &MemoryLogStorage) -> Vec<usize> {
        storage.records().map(|r| r.size).collect()
    }

    #[test]
    fn test_limited_rejects_bad_params() {
        assert_eq!(
            MemoryLogStorage::limited(logger(), 0, 50).unwrap_err().kind(),
            ErrorKind::BadParam
        );
        assert_eq!(
            MemoryLogStorage::limited(logger(), 100, 101).unwrap_err().kind(),
            ErrorKind::BadParam
        );
    }

    #[test]
    fn test_limited_percent_bounds() {
        let keep_all = MemoryLogStorage::limited(logger(), 100, 0).unwrap();
        assert_eq!(keep_all.evict_floor(), 100);

        let drop_all = MemoryLogStorage::limited(logger(), 100, 100).unwrap();
        assert_eq!(drop_all.evict_floor(), 0);
    }

    #[test]
    fn test_add_rejects_empty_record() {
        let mut storage = MemoryLogStorage::unlimited(logger());
        let err = storage.add(RecordBuffer::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadParam);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_add_rejects_record_larger_than_ceiling() {
        let mut storage = MemoryLogStorage::limited(logger(), 100, 50).unwrap();
        storage.add(record(40, 1)).unwrap();

        let err = storage.add(record(101, 2)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadParam);
        assert_eq!(sizes(&storage), vec![40]);
        assert_eq!(storage.total_size(), 40);
    }

    #[test]
    fn test_eviction_makes_room() {
        let mut storage = MemoryLogStorage::limited(logger(), 100, 50).unwrap();
        assert_eq!(storage.evict_floor(), 50);

        storage.add(record(60, b'A')).unwrap();
        assert_eq!(storage.total_size(), 60);

        storage.add(record(60, b'B')).unwrap();
        assert_eq!(storage.total_size(), 60);
        assert_eq!(storage.len(), 1);

        let mut out = [0u8; 60];
        storage.claim_next(&mut out, bucket(1)).unwrap();
        assert!(out.iter().all(|&b| b == b'B'));
    }

    #[test]
    fn test_eviction_keeps_ceiling_for_large_record() {
        // Floor alone (90) would leave no room for a 60 byte record.
        let mut storage = MemoryLogStorage::limited(logger(), 100, 10).unwrap();
        for _ in 0..9 {
            storage.add(record(10, 0)).unwrap();
        }
        storage.add(record(60, 1)).unwrap();

        assert!(storage.total_size() <= 100);
        assert_eq!(sizes(&storage), vec![10, 10, 10, 10, 60]);
    }

    #[test]
    fn test_eviction_is_logged() {
        let capture = Arc::new(Capture::default());
        let mut storage = MemoryLogStorage::limited(capture.clone(), 100, 50).unwrap();
        storage.add(record(60, 0)).unwrap();
        storage.add(record(60, 0)).unwrap();

        let lines = capture.0.lock().unwrap();
        assert!(lines
            .iter()
            .any(|(level, msg)| *level == LogLevel::Info && msg.contains("1 records forcibly removed")));
    }

    #[test]
    fn test_claim_confirm_round_trip() {
        let mut storage = MemoryLogStorage::unlimited(logger());
        storage.add(record(10, 1)).unwrap();
        storage.add(record(20, 2)).unwrap();
        storage.add(record(30, 3)).unwrap();
        assert_eq!(storage.unmarked_total_size(), 60);
        assert_eq!(storage.unmarked_record_count(), 3);

        let mut out = [0u8; 64];
        let written = storage.claim_next(&mut out, bucket(5)).unwrap();
        assert_eq!(written, 10);
        assert_eq!(&out[..10], &[1u8; 10]);
        assert_eq!(storage.unmarked_record_count(), 2);
        assert_eq!(storage.unmarked_total_size(), 50);
        assert_eq!(storage.total_size(), 60);

        storage.confirm(bucket(5)).unwrap();
        assert_eq!(storage.total_size(), 50);
        assert_eq!(sizes(&storage), vec![20, 30]);
        assert_eq!(storage.unmarked_total_size(), 50);
    }

    #[test]
    fn test_claim_retract_round_trip() {
        let mut storage = MemoryLogStorage::unlimited(logger());
        for size in [10, 20, 30] {
            storage.add(record(size, 0)).unwrap();
        }

        let mut out = [0u8; 64];
        storage.claim_next(&mut out, bucket(5)).unwrap();
        storage.retract(bucket(5)).unwrap();

        assert_eq!(storage.unmarked_record_count(), 3);
        assert_eq!(storage.unmarked_total_size(), 60);
        assert!(storage.records().all(|r| r.bucket.is_none()));

        // The retracted record is the oldest again and is claimed first.
        assert_eq!(storage.claim_next(&mut out, bucket(6)).unwrap(), 10);
    }

    #[test]
    fn test_claim_insufficient_buffer_leaves_state() {
        let mut storage = MemoryLogStorage::unlimited(logger());
        storage.add(record(32, 7)).unwrap();

        let mut small = [0u8; 16];
        let err = storage.claim_next(&mut small, bucket(1)).unwrap_err();
        assert_eq!(
            err,
            StorageError::InsufficientBuffer {
                required: 32,
                available: 16
            }
        );
        assert_eq!(storage.unmarked_record_count(), 1);
        assert_eq!(storage.unmarked_total_size(), 32);
        assert_eq!(storage.records().next().unwrap().bucket, None);

        let mut large = [0u8; 32];
        assert_eq!(storage.claim_next(&mut large, bucket(1)).unwrap(), 32);
    }

    #[test]
    fn test_claim_empty_is_not_found() {
        let mut storage = MemoryLogStorage::unlimited(logger());
        let mut out = [0u8; 8];
        let err = storage.claim_next(&mut out, bucket(1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_claim_in_age_order_across_buckets() {
        let mut storage = MemoryLogStorage::unlimited(logger());
        for fill in 1..=4u8 {
            storage.add(record(4, fill)).unwrap();
        }

        let mut out = [0u8; 4];
        storage.claim_next(&mut out, bucket(1)).unwrap();
        assert_eq!(out, [1; 4]);
        storage.claim_next(&mut out, bucket(1)).unwrap();
        assert_eq!(out, [2; 4]);
        storage.claim_next(&mut out, bucket(2)).unwrap();
        assert_eq!(out, [3; 4]);

        // Retracting bucket 1 makes records 1 and 2 the next to claim.
        storage.retract(bucket(1)).unwrap();
        storage.claim_next(&mut out, bucket(3)).unwrap();
        assert_eq!(out, [1; 4]);
        assert_eq!(storage.unmarked_record_count(), 2);
    }

    #[test]
    fn test_confirm_removes_whole_bucket() {
        let mut storage = MemoryLogStorage::unlimited(logger());
        for size in [5, 6, 7] {
            storage.add(record(size, 0)).unwrap();
        }
        let mut out = [0u8; 16];
        storage.claim_next(&mut out, bucket(9)).unwrap();
        storage.claim_next(&mut out, bucket(9)).unwrap();

        storage.confirm(bucket(9)).unwrap();
        assert_eq!(sizes(&storage), vec![7]);
        assert_eq!(storage.total_size(), 7);
        assert_eq!(storage.unmarked_record_count(), 1);
    }

    #[test]
    fn test_unknown_bucket_is_not_found() {
        let mut storage = MemoryLogStorage::unlimited(logger());
        storage.add(record(10, 0)).unwrap();

        assert_eq!(storage.confirm(bucket(3)).unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(storage.retract(bucket(3)).unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(storage.total_size(), 10);
        assert_eq!(storage.unmarked_record_count(), 1);
    }

    #[test]
    fn test_evicted_claimed_record_is_forgotten() {
        let mut storage = MemoryLogStorage::limited(logger(), 100, 50).unwrap();
        storage.add(record(40, 0)).unwrap();
        storage.add(record(40, 0)).unwrap();

        let mut out = [0u8; 40];
        storage.claim_next(&mut out, bucket(7)).unwrap();

        // Overflow: the claimed head goes first.
        storage.add(record(40, 0)).unwrap();
        assert!(storage.records().all(|r| r.bucket.is_none()));

        assert_eq!(storage.confirm(bucket(7)).unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(storage.retract(bucket(7)).unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(storage.unmarked_record_count(), 2);
        assert_eq!(storage.unmarked_total_size(), 80);
    }

    #[test]
    fn test_cursor_survives_front_eviction() {
        let mut storage = MemoryLogStorage::limited(logger(), 30, 34).unwrap();
        for fill in 1..=3u8 {
            storage.add(record(10, fill)).unwrap();
        }
        let mut out = [0u8; 10];
        storage.claim_next(&mut out, bucket(1)).unwrap();
        storage.claim_next(&mut out, bucket(1)).unwrap();

        // Evicts the two claimed records, leaving 3 pending and 4 new.
        storage.add(record(10, 4)).unwrap();
        assert_eq!(storage.len(), 2);

        storage.claim_next(&mut out, bucket(2)).unwrap();
        assert_eq!(out, [3; 10]);
        storage.claim_next(&mut out, bucket(2)).unwrap();
        assert_eq!(out, [4; 10]);
    }

    #[test]
    fn test_full_drain() {
        let mut storage = MemoryLogStorage::unlimited(logger());
        storage.add(record(12, 0)).unwrap();

        let mut out = [0u8; 12];
        storage.claim_next(&mut out, bucket(1)).unwrap();
        storage.confirm(bucket(1)).unwrap();

        assert!(storage.is_empty());
        assert_eq!(storage.total_size(), 0);
        assert_eq!(storage.unmarked_total_size(), 0);
        assert_eq!(storage.next_record_size(), None);
    }

    #[test]
    fn test_next_record_size_skips_claimed() {
        let mut storage = MemoryLogStorage::unlimited(logger());
        storage.add(record(3, 0)).unwrap();
        storage.add(record(5, 0)).unwrap();
        assert_eq!(storage.next_record_size(), Some(3));

        let mut out = [0u8; 8];
        storage.claim_next(&mut out, bucket(1)).unwrap();
        assert_eq!(storage.next_record_size(), Some(5));
    }

    #[test]
    fn test_payload_buffer_helpers() {
        let storage = MemoryLogStorage::unlimited(logger());
        let mut buf = storage.allocate_payload_buffer(8).unwrap();
        buf.as_mut_bytes().copy_from_slice(b"abcdefgh");
        storage.release_payload_buffer(buf).unwrap();

        assert_eq!(
            storage.allocate_payload_buffer(0).unwrap_err().kind(),
            ErrorKind::BadParam
        );
        assert_eq!(
            storage
                .release_payload_buffer(RecordBuffer::default())
                .unwrap_err()
                .kind(),
            ErrorKind::BadParam
        );
    }

    #[test]
    fn test_allocated_buffer_can_be_added() {
        let mut storage = MemoryLogStorage::unlimited(logger());
        let mut buf = storage.allocate_payload_buffer(4).unwrap();
        buf.as_mut_bytes().copy_from_slice(&[9, 8, 7, 6]);
        storage.add(buf).unwrap();

        let mut out = [0u8; 4];
        storage.claim_next(&mut out, bucket(2)).unwrap();
        assert_eq!(out, [9, 8, 7, 6]);
    }

    #[test]
    fn test_destroy_with_records() {
        let mut storage = MemoryLogStorage::unlimited(logger());
        storage.add(record(10, 0)).unwrap();
        storage.add(record(10, 0)).unwrap();
        storage.destroy().unwrap();
    }

    #[test]
    fn test_from_config() {
        let storage =
            MemoryLogStorage::from_config(logger(), &StorageConfig::limited(1000, 25)).unwrap();
        assert_eq!(storage.max_size(), 1000);
        assert_eq!(storage.evict_floor(), 750);

        let storage = MemoryLogStorage::from_config(logger(), &StorageConfig::unlimited()).unwrap();
        assert_eq!(storage.max_size(), 0);
    }

    #[test]
    fn test_trait_status() {
        let mut storage = MemoryLogStorage::unlimited(logger());
        storage.add(record(10, 0)).unwrap();
        storage.add(record(15, 0)).unwrap();

        let status = LogStorage::status(&storage);
        assert_eq!(status.unmarked_size, 25);
        assert_eq!(status.unmarked_count, 2);
    }
}
