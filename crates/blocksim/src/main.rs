//! BlockSim - replay a block I/O trace against an LRU cache

mod report;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use blocktrace::{SimConfig, Simulator, TraceFile, DEFAULT_BLOCK_SIZE};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::report::Report;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Trace file (CSV: timestamp,host,disk,kind,offset,length,...)
    trace: PathBuf,

    /// Total cache size in MB
    cache_mib: u64,

    /// Cache line size in bytes
    #[arg(short, long, default_value_t = DEFAULT_BLOCK_SIZE)]
    block_size: u64,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Print cached block ids after the report, most recently used first
    #[arg(long)]
    dump: bool,

    /// Count distinct blocks touched (memory grows with the trace, not the cache)
    #[arg(long)]
    footprint: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    // Logs go to stderr so the report can be piped
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = SimConfig::from_cache_mib(args.cache_mib, args.block_size)
        .context("invalid cache configuration")?
        .with_footprint(args.footprint);

    let trace = TraceFile::open(&args.trace)
        .with_context(|| format!("failed to open trace {}", args.trace.display()))?;

    info!(
        trace = %trace.path().display(),
        bytes = trace.len(),
        cache_mib = args.cache_mib,
        block_size = config.block_size(),
        capacity_lines = config.capacity_lines(),
        "starting replay"
    );

    let mut sim = Simulator::new(&config).context("failed to create cache")?;
    sim.replay(trace.records())
        .with_context(|| format!("replay of {} aborted", args.trace.display()))?;

    info!(
        requests = sim.stats().requests(),
        skipped = sim.stats().skipped(),
        "replay finished"
    );

    let report = Report::new(&sim);
    let mut out = io::stdout().lock();

    match args.format {
        Format::Text => write!(out, "{}", report)?,
        Format::Json => writeln!(out, "{}", report.to_json()?)?,
    }

    if args.dump {
        for (rank, id) in sim.store().iter().enumerate() {
            writeln!(out, "LIST : {:>10} {:>10}", rank, id)?;
        }
    }

    out.flush()?;
    Ok(())
}
