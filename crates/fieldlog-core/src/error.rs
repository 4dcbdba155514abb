//! Error types for fieldlog storage operations.

use thiserror::Error;

/// Errors that can occur during log storage operations.
///
/// Every operation that returns one of these leaves the storage exactly as it
/// was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// An argument was missing, empty, zero or out of range.
    #[error("bad parameter: {0}")]
    BadParam(String),

    /// An owning operation could not reserve memory.
    #[error("out of memory")]
    NoMemory,

    /// A bucket lookup matched nothing, or no pending record exists.
    #[error("not found: {0}")]
    NotFound(String),

    /// The destination buffer is smaller than the next pending record.
    #[error("insufficient buffer: record needs {required} bytes, buffer has {available}")]
    InsufficientBuffer { required: usize, available: usize },
}

/// Discriminant of a [`StorageError`], for cheap matching at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BadParam,
    NoMemory,
    NotFound,
    InsufficientBuffer,
}

impl StorageError {
    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StorageError::BadParam(_) => ErrorKind::BadParam,
            StorageError::NoMemory => ErrorKind::NoMemory,
            StorageError::NotFound(_) => ErrorKind::NotFound,
            StorageError::InsufficientBuffer { .. } => ErrorKind::InsufficientBuffer,
        }
    }

    pub(crate) fn bad_param(msg: impl Into<String>) -> Self {
        StorageError::BadParam(msg.into())
    }
}

impl From<std::collections::TryReserveError> for StorageError {
    fn from(_: std::collections::TryReserveError) -> Self {
        StorageError::NoMemory
    }
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
