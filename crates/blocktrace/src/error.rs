//! Error types for blocktrace

use std::fmt;
use std::io;

/// Result type alias for blocktrace operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for trace replay
#[derive(Debug)]
pub enum Error {
    /// I/O error
    Io(io::Error),

    /// Malformed trace record
    Parse(String),

    /// Block size or cache size out of range
    InvalidConfig(String),

    /// Cache store error
    Cache(blockcache::Error),
}

impl Error {
    /// Whether this error only affects a single trace record.
    /// Replay skips such records instead of aborting.
    pub fn is_malformed_record(&self) -> bool {
        matches!(self, Error::Parse(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Parse(msg) => write!(f, "Parse error: {}", msg),
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::Cache(e) => write!(f, "Cache error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Cache(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<blockcache::Error> for Error {
    fn from(err: blockcache::Error) -> Self {
        Error::Cache(err)
    }
}

impl From<nom::Err<nom::error::Error<&[u8]>>> for Error {
    fn from(err: nom::Err<nom::error::Error<&[u8]>>) -> Self {
        match err {
            nom::Err::Incomplete(_) => Error::Parse("incomplete record".to_string()),
            nom::Err::Error(e) | nom::Err::Failure(e) => {
                let near = &e.input[..e.input.len().min(16)];
                Error::Parse(format!(
                    "{:?} near {:?}",
                    e.code,
                    String::from_utf8_lossy(near)
                ))
            }
        }
    }
}
