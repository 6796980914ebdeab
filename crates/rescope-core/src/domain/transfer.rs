//! Results returned by resource handle reads and writes.

use serde::{Deserialize, Serialize};

/// Outcome of reading a resource: the bytes consumed and the action's value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadResult<T> {
    /// Bytes read from the resource.
    pub bytes_read: u64,
    /// Value produced by the content action.
    pub value: T,
}

impl<T> ReadResult<T> {
    /// Create a read result.
    pub const fn new(bytes_read: u64, value: T) -> Self {
        Self { bytes_read, value }
    }

    /// Transform the value while keeping the byte count.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ReadResult<U> {
        ReadResult {
            bytes_read: self.bytes_read,
            value: f(self.value),
        }
    }
}

/// Outcome of writing a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteResult {
    /// Bytes written to the resource.
    pub bytes_written: u64,
}

impl WriteResult {
    /// Create a write result.
    pub const fn new(bytes_written: u64) -> Self {
        Self { bytes_written }
    }
}
