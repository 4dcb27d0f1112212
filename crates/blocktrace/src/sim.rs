//! Trace replay against an [`LruStore`]

use std::ops::RangeInclusive;

use ahash::AHashSet;
use blockcache::{BlockId, LruStore};
use tracing::{debug, trace, warn};

use crate::config::SimConfig;
use crate::error::{Error, Result};
use crate::parser::{Request, RequestKind};
use crate::stats::SimStats;

/// Block ids touched by a byte range.
///
/// The range is inclusive of the block holding `offset + length`, so a
/// zero-length request touches one block and a block-aligned request
/// touches one block past its end. Returns `None` if `offset + length`
/// overflows `u64`.
///
/// # Panics
/// If `block_size` is zero.
pub fn block_span(offset: u64, length: u64, block_size: u64) -> Option<RangeInclusive<u64>> {
    let end = offset.checked_add(length)?;
    Some(offset / block_size..=end / block_size)
}

/// Drives an LRU store with trace requests and collects statistics
#[derive(Debug)]
pub struct Simulator {
    store: LruStore,
    block_size: u64,
    stats: SimStats,

    /// Every block id seen so far, when footprint tracking is on
    footprint: Option<AHashSet<u64>>,
}

impl Simulator {
    /// Create a simulator with an empty cache
    ///
    /// # Errors
    /// * [`Error::Cache`](crate::Error::Cache) if the store cannot be allocated
    pub fn new(config: &SimConfig) -> Result<Self> {
        let store = LruStore::new(config.capacity_lines())?;

        debug!(
            block_size = config.block_size(),
            capacity_lines = config.capacity_lines(),
            track_footprint = config.track_footprint(),
            "simulator ready"
        );

        Ok(Self {
            store,
            block_size: config.block_size(),
            stats: SimStats::new(),
            footprint: config.track_footprint().then(AHashSet::new),
        })
    }

    /// Access every block of `request` in increasing order.
    ///
    /// Reads and writes update the cache identically; only read hits
    /// count toward [`SimStats::hits`].
    ///
    /// # Errors
    /// * [`Error::Parse`] if the byte range ends past `u64::MAX`; nothing
    ///   is accessed or counted
    /// * [`Error::Cache`] if a new cache entry cannot be allocated
    pub fn submit(&mut self, request: &Request) -> Result<()> {
        let span =
            block_span(request.offset, request.length, self.block_size).ok_or_else(|| {
                Error::Parse(format!(
                    "request range {}+{} overflows",
                    request.offset, request.length
                ))
            })?;
        trace!(?request.kind, start = span.start(), end = span.end(), "request");

        self.stats.record_request();
        for block in span {
            let access = self.store.access(BlockId::new(block))?;

            if let Some(footprint) = &mut self.footprint {
                if footprint.insert(block) {
                    self.stats.record_new_block();
                }
            }

            match request.kind {
                RequestKind::Read => self.stats.record_read(access.is_hit()),
                RequestKind::Write => self.stats.record_write(),
            }
        }

        Ok(())
    }

    /// Replay `(line_number, record)` pairs, as yielded by
    /// [`Records`](crate::Records).
    ///
    /// Malformed records are logged and skipped. Any other error aborts
    /// the replay.
    pub fn replay<I>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = (usize, Result<Request>)>,
    {
        for (line, record) in records {
            match record {
                Ok(request) => self.submit(&request)?,
                Err(e) if e.is_malformed_record() => {
                    warn!(line, error = %e, "skipping malformed record");
                    self.stats.record_skipped();
                }
                Err(e) => return Err(e),
            }
        }

        Ok(())
    }

    /// Statistics so far
    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// The cache being driven
    pub fn store(&self) -> &LruStore {
        &self.store
    }

    /// Size of one cache line in bytes
    pub fn block_size(&self) -> u64 {
        self.block_size
    }

    /// Whether [`SimStats::distinct_blocks`] is being counted
    pub fn tracks_footprint(&self) -> bool {
        self.footprint.is_some()
    }
}
