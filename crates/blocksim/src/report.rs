//! End-of-run report

use std::fmt;

use blocktrace::Simulator;
use serde::Serialize;

/// Final cache state and replay counters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub size: usize,
    pub capacity: usize,
    pub block_size: u64,
    pub hits: u64,
    pub reads: u64,
    pub writes: u64,
    pub hit_ratio: f64,
    pub evictions: u64,
    pub requests: u64,
    pub skipped: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distinct_blocks: Option<u64>,
}

impl Report {
    pub fn new(sim: &Simulator) -> Self {
        let store = sim.store();
        let stats = sim.stats();

        Self {
            size: store.len(),
            capacity: store.capacity(),
            block_size: sim.block_size(),
            hits: stats.hits(),
            reads: stats.reads(),
            writes: stats.writes(),
            hit_ratio: stats.hit_ratio(),
            evictions: store.evictions(),
            requests: stats.requests(),
            skipped: stats.skipped(),
            distinct_blocks: sim
                .tracks_footprint()
                .then(|| stats.distinct_blocks()),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "========== report ==========")?;
        writeln!(f, "List ({:>10}/{:>10})", self.size, self.capacity)?;
        writeln!(f, "Read ({:>10}/{:>10})", self.hits, self.reads)?;
        writeln!(f, "Write({:>10}/{:>10})", self.writes, self.writes)?;
        writeln!(f, "Hit ratio:  {:.2}%", self.hit_ratio * 100.0)?;
        writeln!(f, "Evictions:  {}", self.evictions)?;
        if let Some(blocks) = self.distinct_blocks {
            writeln!(f, "Footprint:  {} blocks", blocks)?;
        }
        writeln!(f, "Requests:   {} ({} skipped)", self.requests, self.skipped)?;
        writeln!(f, "========== report ==========")
    }
}
