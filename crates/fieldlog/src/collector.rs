//! The log collector: turns stored records into upload buckets and applies
//! delivery outcomes back to storage.
//!
//! Storage only stores, claims and reconciles. The collector owns everything
//! around it: naming buckets, deciding when to upload, sizing a bucket to the
//! message budget and retracting buckets whose outcome never arrived.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use fieldlog_core::{BucketId, ErrorKind, RecordBuffer, SharedLogger, StorageError};
use fieldlog_store::{LogStorage, MemoryLogStorage, StorageStatus};

use crate::config::{CollectorConfig, UploadConfig};
use crate::error::{CollectorError, Result};
use crate::strategy::{UploadDecision, UploadStrategy, VolumeThresholdStrategy};

/// Hands out bucket ids, skipping 0 and ids still in flight.
#[derive(Debug, Clone)]
pub struct BucketAllocator {
    next: BucketId,
}

impl BucketAllocator {
    /// Start allocating from id 1.
    pub fn new() -> Self {
        Self {
            next: BucketId::MIN,
        }
    }

    /// Next id for which `in_use` is false, or `None` if every id is taken.
    pub fn allocate(&mut self, in_use: impl Fn(BucketId) -> bool) -> Option<BucketId> {
        for _ in 0..u16::MAX {
            let candidate = self.next;
            self.next = candidate.next_wrapping();
            if !in_use(candidate) {
                return Some(candidate);
            }
        }
        None
    }
}

impl Default for BucketAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// A batch of records claimed for one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogBucket {
    /// Id to report the delivery outcome with.
    pub id: BucketId,
    /// Serialized records, oldest first.
    pub records: Vec<Vec<u8>>,
}

impl LogBucket {
    /// Total payload bytes in this bucket.
    pub fn size(&self) -> usize {
        self.records.iter().map(Vec::len).sum()
    }
}

/// Collects log records and coordinates their upload.
pub struct LogCollector<S: LogStorage = MemoryLogStorage> {
    storage: S,
    strategy: Box<dyn UploadStrategy>,
    allocator: BucketAllocator,
    /// Buckets awaiting an outcome, with the time they were prepared.
    in_flight: HashMap<BucketId, Instant>,
    bucket_size: usize,
    upload_timeout: Duration,
    logger: SharedLogger,
}

impl LogCollector<MemoryLogStorage> {
    /// Create a collector over in-memory storage from configuration.
    pub fn from_config(logger: SharedLogger, config: &CollectorConfig) -> Result<Self> {
        config.validate()?;
        let storage = MemoryLogStorage::from_config(logger.clone(), &config.storage)?;
        let strategy = VolumeThresholdStrategy::from_config(&config.upload);
        Ok(Self::new(logger, storage, Box::new(strategy), &config.upload))
    }
}

impl<S: LogStorage> LogCollector<S> {
    /// Create a collector over the given storage.
    pub fn new(
        logger: SharedLogger,
        storage: S,
        strategy: Box<dyn UploadStrategy>,
        upload: &UploadConfig,
    ) -> Self {
        Self {
            storage,
            strategy,
            allocator: BucketAllocator::new(),
            in_flight: HashMap::new(),
            bucket_size: upload.bucket_size,
            upload_timeout: upload.upload_timeout(),
            logger,
        }
    }

    /// Get the storage reference.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the collector and return its storage.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Pending subset of the storage.
    pub fn status(&self) -> StorageStatus {
        self.storage.status()
    }

    /// Number of buckets awaiting a delivery outcome.
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Whether `id` is awaiting a delivery outcome.
    pub fn is_in_flight(&self, id: BucketId) -> bool {
        self.in_flight.contains_key(&id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Producer side
    // ─────────────────────────────────────────────────────────────────────────

    /// Store a record and report whether an upload is due.
    pub fn add_record(&mut self, record: RecordBuffer) -> Result<UploadDecision> {
        self.storage.add(record)?;
        Ok(self.strategy.decide(&self.storage.status()))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Upload side
    // ─────────────────────────────────────────────────────────────────────────

    /// Claim pending records into a new bucket of at most `bucket_size` bytes.
    ///
    /// Returns `None` when nothing is pending. Records are claimed oldest
    /// first until the next one does not fit.
    ///
    /// If a claim fails part way, the records already claimed are retracted.
    /// When that retract fails as well, the bucket stays in flight so that
    /// [`expire_timeouts`](Self::expire_timeouts) retries it.
    pub fn prepare_bucket(&mut self, now: Instant) -> Result<Option<LogBucket>> {
        let first = match self.storage.next_record_size() {
            Some(size) => size,
            None => return Ok(None),
        };
        if first > self.bucket_size {
            return Err(CollectorError::BucketTooSmall {
                required: first,
                bucket_size: self.bucket_size,
            });
        }

        // No bucket can carry more than what is pending.
        let scratch_len = self.bucket_size.min(self.storage.unmarked_total_size());
        let mut scratch: Vec<u8> = Vec::new();
        scratch
            .try_reserve_exact(scratch_len)
            .map_err(StorageError::from)?;
        scratch.resize(scratch_len, 0);

        let in_flight = &self.in_flight;
        let id = self
            .allocator
            .allocate(|id| in_flight.contains_key(&id))
            .ok_or(CollectorError::NoFreeBucketId {
                in_flight: self.in_flight.len(),
            })?;

        let mut remaining = scratch_len;
        let mut records = Vec::new();

        while remaining > 0 {
            match self.storage.claim_next(&mut scratch[..remaining], id) {
                Ok(len) => {
                    records.push(scratch[..len].to_vec());
                    remaining -= len;
                }
                Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::InsufficientBuffer) => {
                    break
                }
                Err(e) => {
                    if !records.is_empty() {
                        if let Err(retract_err) = self.storage.retract(id) {
                            self.logger.warn(&format!(
                                "partial bucket {} not retracted ({}), keeping it until timeout",
                                id, retract_err
                            ));
                            self.in_flight.insert(id, now);
                        }
                    }
                    return Err(e.into());
                }
            }
        }

        self.in_flight.insert(id, now);
        let bucket = LogBucket { id, records };
        self.logger.debug(&format!(
            "prepared log bucket {}: {} records, {} bytes",
            id,
            bucket.records.len(),
            bucket.size()
        ));
        Ok(Some(bucket))
    }

    /// The platform acknowledged bucket `id`: drop its records.
    pub fn on_delivery_success(&mut self, id: BucketId) -> Result<()> {
        self.in_flight
            .remove(&id)
            .ok_or(CollectorError::UnknownBucket(id))?;
        self.storage.confirm(id)?;
        Ok(())
    }

    /// Delivery of bucket `id` failed: its records go out again later.
    pub fn on_delivery_failure(&mut self, id: BucketId) -> Result<()> {
        self.in_flight
            .remove(&id)
            .ok_or(CollectorError::UnknownBucket(id))?;
        self.storage.retract(id)?;
        Ok(())
    }

    /// Retract every bucket that has waited longer than the upload timeout.
    ///
    /// Returns the buckets whose records became pending again. Buckets whose
    /// records were all evicted meanwhile are dropped with a warning.
    pub fn expire_timeouts(&mut self, now: Instant) -> Vec<BucketId> {
        let timeout = self.upload_timeout;
        let mut expired: Vec<BucketId> = self
            .in_flight
            .iter()
            .filter(|(_, prepared)| now.saturating_duration_since(**prepared) >= timeout)
            .map(|(&id, _)| id)
            .collect();
        expired.sort();

        let mut retracted = Vec::with_capacity(expired.len());
        for id in expired {
            self.in_flight.remove(&id);
            match self.storage.retract(id) {
                Ok(()) => retracted.push(id),
                Err(e) => self
                    .logger
                    .warn(&format!("timed out bucket {} not retracted: {}", id, e)),
            }
        }

        if !retracted.is_empty() {
            self.logger
                .info(&format!("{} log buckets timed out", retracted.len()));
        }
        retracted
    }
}
