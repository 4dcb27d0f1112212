//! # blocktrace
//!
//! Replays block-level I/O traces against a [`blockcache::LruStore`].
//!
//! ## Pipeline
//! - **Reader**: streams the trace line by line
//! - **Parser**: extracts kind, offset and length from each CSV record (nom)
//! - **Simulator**: maps each byte range to block ids and drives the cache
//!
//! Malformed records are skipped with a warning; configuration and I/O
//! errors are fatal.

#![warn(missing_docs)]

mod config;
mod error;
mod parser;
mod reader;
mod sim;
mod stats;

pub use config::{SimConfig, DEFAULT_BLOCK_SIZE, DEFAULT_CACHE_SIZE, KIB, MIB};
pub use error::{Error, Result};
pub use parser::{parse_record, Request, RequestKind};
pub use reader::{FileRecords, Records, TraceFile};
pub use sim::{block_span, Simulator};
pub use stats::SimStats;
