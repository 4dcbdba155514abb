use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use fieldlog_core::TracingLogger;
use fieldlog_store::MemoryLogStorage;
use fieldlog_testkit::{bucket, random_record};

fn add_claim_confirm(c: &mut Criterion) {
    c.bench_function("add_claim_confirm_64x128b", |b| {
        b.iter_batched(
            || {
                let records: Vec<_> = (0..64).map(|_| random_record(128)).collect();
                (MemoryLogStorage::unlimited(TracingLogger::shared("bench")), records)
            },
            |(mut storage, records)| {
                for record in records {
                    storage.add(record).unwrap();
                }
                let mut out = [0u8; 128];
                let id = bucket(1);
                while storage.claim_next(&mut out, id).is_ok() {
                    black_box(&out);
                }
                storage.confirm(id).unwrap();
                storage
            },
            BatchSize::SmallInput,
        )
    });
}

fn eviction_pressure(c: &mut Criterion) {
    c.bench_function("add_with_eviction_4k", |b| {
        b.iter_batched(
            || {
                let records: Vec<_> = (0..256).map(|_| random_record(100)).collect();
                let storage =
                    MemoryLogStorage::limited(TracingLogger::shared("bench"), 4096, 50).unwrap();
                (storage, records)
            },
            |(mut storage, records)| {
                for record in records {
                    storage.add(record).unwrap();
                }
                storage
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, add_claim_confirm, eviction_pressure);
criterion_main!(benches);
