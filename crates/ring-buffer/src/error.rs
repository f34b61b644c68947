//! Ring Buffer Error Types

use thiserror::Error;

/// Errors reported by the fallible ring buffer accessors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RingBufferError {
    /// Age index does not address a live value
    #[error("age index {index} out of range for buffer of length {len}")]
    AgeOutOfRange { index: usize, len: usize },
}
