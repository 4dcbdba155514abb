//! Test fixtures and helpers.
//!
//! Common setup code for storage and collector tests.

use std::sync::{Arc, Mutex};

use fieldlog_core::{BucketId, LogLevel, Logger, RecordBuffer, SharedLogger};
use fieldlog_store::MemoryLogStorage;
use rand::RngCore;

/// Logger that keeps every message for later assertions.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    lines: Mutex<Vec<(LogLevel, String)>>,
}

impl RecordingLogger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every message logged so far.
    pub fn lines(&self) -> Vec<(LogLevel, String)> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// Whether some message at `level` contains `needle`.
    pub fn contains(&self, level: LogLevel, needle: &str) -> bool {
        self.lines()
            .iter()
            .any(|(l, msg)| *l == level && msg.contains(needle))
    }
}

impl Logger for RecordingLogger {
    fn log(&self, level: LogLevel, message: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((level, message.to_string()));
        }
    }
}

/// A storage together with the logger it was built with.
pub struct StorageFixture {
    pub logger: Arc<RecordingLogger>,
    pub storage: MemoryLogStorage,
}

impl StorageFixture {
    /// Fixture around an unlimited storage.
    pub fn unlimited() -> Self {
        let logger = RecordingLogger::new();
        let storage = MemoryLogStorage::unlimited(shared(&logger));
        Self { logger, storage }
    }

    /// Fixture around a storage capped at `max_size` bytes.
    pub fn limited(max_size: usize, percent_to_delete: u8) -> Self {
        let logger = RecordingLogger::new();
        let storage = MemoryLogStorage::limited(shared(&logger), max_size, percent_to_delete)
            .expect("valid storage parameters");
        Self { logger, storage }
    }

    /// Add one random record per size, oldest first.
    pub fn fill(&mut self, sizes: &[usize]) {
        for &size in sizes {
            self.storage
                .add(random_record(size))
                .expect("record accepted by storage");
        }
    }

    /// Sizes of the stored records, oldest first.
    pub fn sizes(&self) -> Vec<usize> {
        self.storage.records().map(|r| r.size).collect()
    }
}

/// Coerce a recording logger into a shared handle.
pub fn shared(logger: &Arc<RecordingLogger>) -> SharedLogger {
    logger.clone()
}

/// A record of `size` random bytes.
pub fn random_record(size: usize) -> RecordBuffer {
    let mut data = vec![0u8; size];
    rand::thread_rng().fill_bytes(&mut data);
    RecordBuffer::from(data)
}

/// A record of `size` bytes all equal to `fill`.
pub fn filled_record(size: usize, fill: u8) -> RecordBuffer {
    RecordBuffer::from(vec![fill; size])
}

/// Shorthand for a bucket id in tests.
pub fn bucket(raw: u16) -> BucketId {
    BucketId::new(raw).expect("non-zero bucket id")
}
