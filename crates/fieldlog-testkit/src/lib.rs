//! # fieldlog testkit
//!
//! Testing utilities for fieldlog storage.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Model**: a deliberately naive reference storage and an invariant
//!   checker for [`MemoryLogStorage`](fieldlog_store::MemoryLogStorage)
//! - **Generators**: Proptest strategies for operation sequences
//! - **Fixtures**: a recording logger and storage setup helpers
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use fieldlog_testkit::generators::{apply, apply_model, ops, storage_params};
//!
//! proptest! {
//!     #[test]
//!     fn engine_matches_model(params in storage_params(), ops in ops(64)) {
//!         // build both from `params`, apply every op, compare outcomes
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use fieldlog_testkit::fixtures::StorageFixture;
//!
//! let mut fixture = StorageFixture::limited(100, 50);
//! fixture.fill(&[60, 60]);
//! assert_eq!(fixture.sizes(), vec![60]);
//! ```

pub mod fixtures;
pub mod generators;
pub mod model;

pub use fixtures::{bucket, filled_record, random_record, shared, RecordingLogger, StorageFixture};
pub use generators::{apply, apply_model, Op, StorageParams};
pub use model::{check_invariants, storage_shape, ModelStorage, Outcome};
