//! Proptest generators for property-based testing.

use proptest::prelude::*;

use fieldlog_core::{BucketId, RecordBuffer};
use fieldlog_store::MemoryLogStorage;

use crate::model::{ModelStorage, Outcome};

/// One storage operation.
#[derive(Debug, Clone)]
pub enum Op {
    Add { size: usize, fill: u8 },
    Claim { capacity: usize, bucket: BucketId },
    Confirm(BucketId),
    Retract(BucketId),
}

/// Storage construction parameters.
#[derive(Debug, Clone, Copy)]
pub enum StorageParams {
    Unlimited,
    Limited { max_size: usize, percent_to_delete: u8 },
}

impl StorageParams {
    /// Build the real storage these parameters describe.
    pub fn build(&self, logger: fieldlog_core::SharedLogger) -> MemoryLogStorage {
        match *self {
            StorageParams::Unlimited => MemoryLogStorage::unlimited(logger),
            StorageParams::Limited {
                max_size,
                percent_to_delete,
            } => MemoryLogStorage::limited(logger, max_size, percent_to_delete)
                .expect("generated parameters are valid"),
        }
    }

    /// Build the matching reference model.
    pub fn model(&self) -> ModelStorage {
        match *self {
            StorageParams::Unlimited => ModelStorage::unlimited(),
            StorageParams::Limited {
                max_size,
                percent_to_delete,
            } => ModelStorage::limited(max_size, percent_to_delete),
        }
    }
}

/// Generate a bucket id from a small pool so that ids collide often.
pub fn bucket_id() -> impl Strategy<Value = BucketId> {
    (1u16..=4).prop_map(|raw| BucketId::new(raw).expect("non-zero"))
}

/// Generate a record size, including the invalid size 0.
pub fn record_size() -> impl Strategy<Value = usize> {
    prop_oneof![
        1 => Just(0usize),
        10 => 1usize..=64,
    ]
}

/// Generate one operation.
pub fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (record_size(), any::<u8>()).prop_map(|(size, fill)| Op::Add { size, fill }),
        3 => (0usize..=72, bucket_id()).prop_map(|(capacity, bucket)| Op::Claim { capacity, bucket }),
        1 => bucket_id().prop_map(Op::Confirm),
        1 => bucket_id().prop_map(Op::Retract),
    ]
}

/// Generate a sequence of up to `max_len` operations.
pub fn ops(max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op(), 0..=max_len)
}

/// Generate storage parameters; limited ceilings are small to force eviction.
pub fn storage_params() -> impl Strategy<Value = StorageParams> {
    prop_oneof![
        1 => Just(StorageParams::Unlimited),
        3 => (1usize..=256, 0u8..=100).prop_map(|(max_size, percent_to_delete)| {
            StorageParams::Limited {
                max_size,
                percent_to_delete,
            }
        }),
    ]
}

/// Apply `op` to a real storage.
pub fn apply(storage: &mut MemoryLogStorage, op: &Op) -> Outcome {
    match op {
        Op::Add { size, fill } => match storage.add(RecordBuffer::from(vec![*fill; *size])) {
            Ok(()) => Outcome::Added,
            Err(e) => Outcome::Failed(e.kind()),
        },
        Op::Claim { capacity, bucket } => {
            let mut out = vec![0u8; *capacity];
            match storage.claim_next(&mut out, *bucket) {
                Ok(len) => {
                    out.truncate(len);
                    Outcome::Claimed(out)
                }
                Err(e) => Outcome::Failed(e.kind()),
            }
        }
        Op::Confirm(bucket) => match storage.confirm(*bucket) {
            Ok(()) => Outcome::Confirmed,
            Err(e) => Outcome::Failed(e.kind()),
        },
        Op::Retract(bucket) => match storage.retract(*bucket) {
            Ok(()) => Outcome::Retracted,
            Err(e) => Outcome::Failed(e.kind()),
        },
    }
}

/// Apply `op` to the model.
pub fn apply_model(model: &mut ModelStorage, op: &Op) -> Outcome {
    match op {
        Op::Add { size, fill } => model.add(vec![*fill; *size]),
        Op::Claim { capacity, bucket } => model.claim_next(*capacity, *bucket),
        Op::Confirm(bucket) => model.confirm(*bucket),
        Op::Retract(bucket) => model.retract(*bucket),
    }
}
