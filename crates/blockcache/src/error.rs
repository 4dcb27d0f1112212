//! Error types for blockcache

use std::collections::TryReserveError;
use std::fmt;

/// Result type alias for blockcache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Capacity must be at least one entry
    InvalidCapacity(usize),

    /// Block ids are non-negative
    InvalidBlockId(i64),

    /// Memory for an entry or the bucket array could not be reserved
    AllocationFailed(TryReserveError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCapacity(capacity) => {
                write!(f, "Invalid capacity: {} entries (min 1)", capacity)
            }
            Error::InvalidBlockId(id) => write!(f, "Invalid block id: {} (must be >= 0)", id),
            Error::AllocationFailed(e) => write!(f, "Allocation failed: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::AllocationFailed(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TryReserveError> for Error {
    fn from(err: TryReserveError) -> Self {
        Error::AllocationFailed(err)
    }
}
