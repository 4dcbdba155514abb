//! Strong type definitions for fieldlog.
//!
//! Bucket identifiers and record payloads are newtypes so that the reserved
//! "unmarked" tag and shared payload ownership cannot be expressed by mistake.

use std::fmt;
use std::num::NonZeroU16;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StorageError};

/// Identifier of one upload batch ("bucket").
///
/// Bucket ids are assigned by the transport side and are opaque to storage:
/// only equality matters. Zero is reserved for records that are not claimed by
/// any bucket, so it is not a valid `BucketId`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct BucketId(NonZeroU16);

impl BucketId {
    /// The smallest valid bucket id.
    pub const MIN: Self = Self(NonZeroU16::MIN);

    /// Create a bucket id, rejecting the reserved value 0.
    pub fn new(raw: u16) -> Result<Self> {
        NonZeroU16::new(raw)
            .map(Self)
            .ok_or_else(|| StorageError::bad_param("bucket id 0 is reserved for unmarked records"))
    }

    /// Get the raw value.
    pub const fn get(self) -> u16 {
        self.0.get()
    }

    /// The id following this one, wrapping from `u16::MAX` back to 1.
    pub fn next_wrapping(self) -> Self {
        match self.0.checked_add(1) {
            Some(next) => Self(next),
            None => Self::MIN,
        }
    }
}

impl From<NonZeroU16> for BucketId {
    fn from(raw: NonZeroU16) -> Self {
        Self(raw)
    }
}

impl TryFrom<u16> for BucketId {
    type Error = StorageError;

    fn try_from(raw: u16) -> Result<Self> {
        Self::new(raw)
    }
}

impl From<BucketId> for u16 {
    fn from(id: BucketId) -> u16 {
        id.get()
    }
}

impl fmt::Debug for BucketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BucketId({})", self.get())
    }
}

impl fmt::Display for BucketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// An owned, serialized log record payload.
///
/// `RecordBuffer` is deliberately not `Clone`: handing it to storage moves it,
/// and the producer keeps no reference to the bytes afterwards.
#[derive(PartialEq, Eq, Default)]
pub struct RecordBuffer(Vec<u8>);

impl RecordBuffer {
    /// Allocate a zero-filled buffer of `size` bytes.
    ///
    /// Fails with `BadParam` for a zero size and `NoMemory` when the
    /// allocation cannot be reserved.
    pub fn allocate(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(StorageError::bad_param("record buffer size must be non-zero"));
        }
        let mut data = Vec::new();
        data.try_reserve_exact(size)?;
        data.resize(size, 0);
        Ok(Self(data))
    }

    /// Number of payload bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Payload bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Mutable payload bytes, for producers filling an allocated buffer.
    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

impl From<Vec<u8>> for RecordBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self(data)
    }
}

impl fmt::Debug for RecordBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let preview = &self.0[..self.0.len().min(8)];
        write!(f, "RecordBuffer({} bytes, {}", self.0.len(), hex::encode(preview))?;
        if self.0.len() > preview.len() {
            write!(f, "..")?;
        }
        write!(f, ")")
    }
}
