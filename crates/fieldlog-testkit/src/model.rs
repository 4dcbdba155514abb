//! Reference model of log storage semantics and an invariant checker.
//!
//! The model is a plain vector scanned from the front on every claim. It has
//! no cursor and recomputes every aggregate, so agreement with
//! [`MemoryLogStorage`] on every outcome checks the engine's bookkeeping.

use fieldlog_core::{BucketId, ErrorKind};
use fieldlog_store::MemoryLogStorage;

/// Observable result of one storage operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Added,
    Claimed(Vec<u8>),
    Confirmed,
    Retracted,
    Failed(ErrorKind),
}

#[derive(Debug, Clone)]
struct ModelRecord {
    data: Vec<u8>,
    bucket: Option<BucketId>,
}

/// Straightforward storage model.
#[derive(Debug, Clone, Default)]
pub struct ModelStorage {
    records: Vec<ModelRecord>,
    max_size: usize,
    evict_floor: usize,
}

impl ModelStorage {
    /// Model of storage without a size ceiling.
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Model of storage capped at `max_size` bytes.
    pub fn limited(max_size: usize, percent_to_delete: u8) -> Self {
        Self {
            records: Vec::new(),
            max_size,
            evict_floor: max_size * (100 - percent_to_delete as usize) / 100,
        }
    }

    fn total(&self) -> usize {
        self.records.iter().map(|r| r.data.len()).sum()
    }

    /// Append `data`, evicting the oldest records first when over the ceiling.
    pub fn add(&mut self, data: Vec<u8>) -> Outcome {
        let size = data.len();
        if size == 0 || (self.max_size > 0 && size > self.max_size) {
            return Outcome::Failed(ErrorKind::BadParam);
        }
        if self.max_size > 0 && self.total() + size > self.max_size {
            let target = self.evict_floor.min(self.max_size - size);
            while self.total() > target && !self.records.is_empty() {
                self.records.remove(0);
            }
        }
        self.records.push(ModelRecord { data, bucket: None });
        Outcome::Added
    }

    /// Claim the oldest pending record if it fits into `capacity` bytes.
    pub fn claim_next(&mut self, capacity: usize, bucket: BucketId) -> Outcome {
        let Some(record) = self.records.iter_mut().find(|r| r.bucket.is_none()) else {
            return Outcome::Failed(ErrorKind::NotFound);
        };
        if record.data.len() > capacity {
            return Outcome::Failed(ErrorKind::InsufficientBuffer);
        }
        record.bucket = Some(bucket);
        Outcome::Claimed(record.data.clone())
    }

    /// Drop every record claimed for `bucket`.
    pub fn confirm(&mut self, bucket: BucketId) -> Outcome {
        let before = self.records.len();
        self.records.retain(|r| r.bucket != Some(bucket));
        if self.records.len() == before {
            Outcome::Failed(ErrorKind::NotFound)
        } else {
            Outcome::Confirmed
        }
    }

    /// Return every record claimed for `bucket` to pending.
    pub fn retract(&mut self, bucket: BucketId) -> Outcome {
        let mut found = false;
        for record in self.records.iter_mut().filter(|r| r.bucket == Some(bucket)) {
            record.bucket = None;
            found = true;
        }
        if found {
            Outcome::Retracted
        } else {
            Outcome::Failed(ErrorKind::NotFound)
        }
    }

    /// `(size, bucket)` of every record, oldest first.
    pub fn shape(&self) -> Vec<(usize, Option<BucketId>)> {
        self.records
            .iter()
            .map(|r| (r.data.len(), r.bucket))
            .collect()
    }
}

/// Shape of a real storage, comparable with [`ModelStorage::shape`].
pub fn storage_shape(storage: &MemoryLogStorage) -> Vec<(usize, Option<BucketId>)> {
    storage.records().map(|r| (r.size, r.bucket)).collect()
}

/// Check the aggregate counters of `storage` against its records.
pub fn check_invariants(storage: &MemoryLogStorage) -> Result<(), String> {
    let total: usize = storage.records().map(|r| r.size).sum();
    if total != storage.total_size() {
        return Err(format!(
            "total_size {} != sum of record sizes {}",
            storage.total_size(),
            total
        ));
    }

    let pending: Vec<_> = storage.records().filter(|r| r.bucket.is_none()).collect();
    let pending_size: usize = pending.iter().map(|r| r.size).sum();
    if pending_size != storage.unmarked_total_size() {
        return Err(format!(
            "unmarked size {} != sum of pending sizes {}",
            storage.unmarked_total_size(),
            pending_size
        ));
    }
    if pending.len() != storage.unmarked_record_count() {
        return Err(format!(
            "unmarked count {} != pending records {}",
            storage.unmarked_record_count(),
            pending.len()
        ));
    }

    if storage.max_size() > 0 && storage.total_size() > storage.max_size() {
        return Err(format!(
            "total_size {} exceeds max_size {}",
            storage.total_size(),
            storage.max_size()
        ));
    }

    let mut ids = storage.records().map(|r| r.id);
    if let Some(mut prev) = ids.next() {
        for id in ids {
            if id <= prev {
                return Err(format!("record ids out of order: {} after {}", id, prev));
            }
            prev = id;
        }
    }

    Ok(())
}
