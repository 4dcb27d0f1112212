//! Replay statistics tracking

/// Counters accumulated over a trace replay.
///
/// Reads and writes count block accesses, not requests: a request
/// spanning three blocks adds three. Only read hits are counted as hits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimStats {
    requests: u64,
    reads: u64,
    writes: u64,
    hits: u64,
    skipped: u64,
    distinct_blocks: u64,
}

impl SimStats {
    /// Create new stats tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a replayed request
    pub fn record_request(&mut self) {
        self.requests += 1;
    }

    /// Record a block read
    pub fn record_read(&mut self, hit: bool) {
        self.reads += 1;
        if hit {
            self.hits += 1;
        }
    }

    /// Record a block write
    pub fn record_write(&mut self) {
        self.writes += 1;
    }

    /// Record a malformed record that was skipped
    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    /// Record the first access to a block id
    pub fn record_new_block(&mut self) {
        self.distinct_blocks += 1;
    }

    /// Requests replayed
    pub fn requests(&self) -> u64 {
        self.requests
    }

    /// Block reads
    pub fn reads(&self) -> u64 {
        self.reads
    }

    /// Block writes
    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// Block reads that hit
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Block reads that missed
    pub fn read_misses(&self) -> u64 {
        self.reads - self.hits
    }

    /// Malformed records skipped
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Distinct block ids touched. Each one missed at least once.
    /// Stays zero unless footprint tracking is enabled.
    pub fn distinct_blocks(&self) -> u64 {
        self.distinct_blocks
    }

    /// Read hit ratio (0.0 to 1.0)
    pub fn hit_ratio(&self) -> f64 {
        if self.reads == 0 {
            0.0
        } else {
            self.hits as f64 / self.reads as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_basic() {
        let mut stats = SimStats::new();

        stats.record_read(true);
        stats.record_read(true);
        stats.record_read(false);
        stats.record_write();

        assert_eq!(stats.reads(), 3);
        assert_eq!(stats.hits(), 2);
        assert_eq!(stats.read_misses(), 1);
        assert_eq!(stats.writes(), 1);
        assert_eq!(stats.hit_ratio(), 2.0 / 3.0);
    }

    #[test]
    fn test_hit_ratio_without_reads() {
        let mut stats = SimStats::new();
        stats.record_write();

        assert_eq!(stats.hit_ratio(), 0.0);
    }
}
