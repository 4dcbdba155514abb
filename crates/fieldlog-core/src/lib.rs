//! # fieldlog core
//!
//! Primitives shared by every fieldlog crate: bucket identifiers, owned
//! record payloads, the error type and the injected logger seam.
//!
//! This crate does no buffering of its own. See `fieldlog-store` for the
//! storage engine.
//!
//! ## Key Types
//!
//! - [`BucketId`] - Non-zero identifier of an upload batch
//! - [`RecordBuffer`] - Move-only serialized log record
//! - [`StorageError`] - Errors returned by storage operations
//! - [`Logger`] - Leveled text sink, injected at construction

pub mod error;
pub mod logging;
pub mod types;

pub use error::{ErrorKind, Result, StorageError};
pub use logging::{LogLevel, Logger, SharedLogger, TracingLogger};
pub use types::{BucketId, RecordBuffer};
