//! Simulation configuration

use crate::error::{Error, Result};

/// One kibibyte
pub const KIB: u64 = 1024;

/// One mebibyte
pub const MIB: u64 = KIB * KIB;

/// Default cache line size (4 KB)
pub const DEFAULT_BLOCK_SIZE: u64 = 4 * KIB;

/// Default total cache size (128 MB)
pub const DEFAULT_CACHE_SIZE: u64 = 128 * MIB;

/// Cache geometry for a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    block_size: u64,
    capacity_lines: usize,
    track_footprint: bool,
}

impl SimConfig {
    /// Create a config from an explicit line count
    ///
    /// # Errors
    /// * [`Error::InvalidConfig`] if either value is zero
    pub fn new(block_size: u64, capacity_lines: usize) -> Result<Self> {
        if block_size == 0 {
            return Err(Error::InvalidConfig("block size must be > 0".to_string()));
        }
        if capacity_lines == 0 {
            return Err(Error::InvalidConfig(
                "cache must hold at least one block".to_string(),
            ));
        }

        Ok(Self {
            block_size,
            capacity_lines,
            track_footprint: false,
        })
    }

    /// Derive the line count from a total cache size in bytes.
    /// Any remainder smaller than one block is dropped.
    pub fn from_cache_bytes(cache_bytes: u64, block_size: u64) -> Result<Self> {
        if block_size == 0 {
            return Err(Error::InvalidConfig("block size must be > 0".to_string()));
        }

        let lines = cache_bytes / block_size;
        let capacity_lines = usize::try_from(lines).map_err(|_| {
            Error::InvalidConfig(format!("{} cache lines exceed addressable memory", lines))
        })?;

        if capacity_lines == 0 {
            return Err(Error::InvalidConfig(format!(
                "cache size {} bytes is smaller than one {} byte block",
                cache_bytes, block_size
            )));
        }

        Self::new(block_size, capacity_lines)
    }

    /// Derive the line count from a total cache size in mebibytes
    pub fn from_cache_mib(cache_mib: u64, block_size: u64) -> Result<Self> {
        let cache_bytes = cache_mib
            .checked_mul(MIB)
            .ok_or_else(|| Error::InvalidConfig(format!("cache size {} MB overflows", cache_mib)))?;
        Self::from_cache_bytes(cache_bytes, block_size)
    }

    /// Count distinct block ids touched. Off by default: the set of seen
    /// ids grows with the trace footprint, not the cache capacity.
    pub fn with_footprint(mut self, track: bool) -> Self {
        self.track_footprint = track;
        self
    }

    /// Whether distinct block ids are counted
    pub fn track_footprint(&self) -> bool {
        self.track_footprint
    }

    /// Size of one cache line in bytes
    pub fn block_size(&self) -> u64 {
        self.block_size
    }

    /// Number of lines the cache holds
    pub fn capacity_lines(&self) -> usize {
        self.capacity_lines
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            capacity_lines: (DEFAULT_CACHE_SIZE / DEFAULT_BLOCK_SIZE) as usize,
            track_footprint: false,
        }
    }
}
