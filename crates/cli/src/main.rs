//! Cache simulator CLI.
//!
//! This binary replays a valgrind memory trace against a set-associative LRU
//! cache and reports the hit, miss and eviction counts. It performs:
//! 1. **Shape setup:** From `-s`/`-E`/`-b` or a JSON `--config` file, validated before any I/O.
//! 2. **Replay:** Streams the `-t` trace through the simulator, optionally echoing each outcome.
//! 3. **Report:** Prints the summary (text or JSON) and optionally writes a results file.

use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use csim_core::common::constants::RESULTS_FILE;
use csim_core::common::{ConfigError, TraceError};
use csim_core::config::{CacheConfig, Config, GeneralConfig};
use csim_core::sim::{Replay, Simulator, TraceEvent, TraceReader};
use csim_core::stats::SimStats;

#[derive(Parser, Debug)]
#[command(
    name = "csim",
    version,
    about = "Set-associative LRU cache simulator",
    long_about = "Replays a valgrind memory trace against a cache with 2^s sets of E lines and 2^b-byte blocks.\n\nExamples:\n  csim -s 4 -E 1 -b 4 -t traces/yi.trace\n  csim -v -s 8 -E 2 -b 4 -t traces/yi.trace\n  csim --config cache.json -t traces/yi.trace --json"
)]
struct Cli {
    /// Print every data access followed by its outcome.
    #[arg(short, long)]
    verbose: bool,

    /// Number of set index bits (the cache has 2^s sets).
    #[arg(
        short = 's',
        value_name = "NUM",
        required_unless_present = "config",
        conflicts_with = "config"
    )]
    set_bits: Option<u32>,

    /// Number of lines per set (associativity).
    #[arg(
        short = 'E',
        value_name = "NUM",
        required_unless_present = "config",
        conflicts_with = "config"
    )]
    ways: Option<usize>,

    /// Number of block offset bits (blocks are 2^b bytes).
    #[arg(
        short = 'b',
        value_name = "NUM",
        required_unless_present = "config",
        conflicts_with = "config"
    )]
    block_bits: Option<u32>,

    /// Valgrind trace to replay.
    #[arg(short = 't', long = "trace", value_name = "FILE")]
    trace: PathBuf,

    /// JSON file supplying the cache shape instead of -s/-E/-b.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Also write "hits misses evictions" to FILE (default .csim_results).
    #[arg(
        long,
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = RESULTS_FILE
    )]
    results: Option<PathBuf>,

    /// Print the final counts as JSON instead of the summary line.
    #[arg(long)]
    json: bool,
}

/// A failure that ends the run with exit code 1.
#[derive(Debug, Error)]
enum CliError {
    /// Neither the shape flags nor `--config` were given.
    #[error("missing required argument: -s, -E and -b (or --config)")]
    MissingShape,

    /// The `--config` file could not be loaded.
    #[error(transparent)]
    Load(ConfigError),

    /// The requested shape cannot be simulated.
    #[error("invalid cache shape: {0}")]
    Shape(ConfigError),

    /// The trace file could not be opened.
    #[error(transparent)]
    Open(TraceError),

    /// The trace failed part way through.
    #[error("{}: {source}", .path.display())]
    Replay {
        /// Trace being replayed.
        path: PathBuf,
        /// First read or parse failure.
        source: TraceError,
    },

    /// Verbose or summary output could not be written.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),

    /// The stats could not be serialized for `--json`.
    #[error("failed to encode stats: {0}")]
    Encode(#[from] serde_json::Error),

    /// The results file could not be written.
    #[error("{}: {source}", .path.display())]
    Results {
        /// Requested results file.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(&cli, &mut io::stdout().lock()) {
        eprintln!("csim: {e}");
        process::exit(1);
    }
}

/// Validates the shape, replays the trace and reports to `out`.
///
/// The shape is checked before the trace file is touched.
fn run(cli: &Cli, out: &mut impl Write) -> Result<SimStats, CliError> {
    let config = resolve_config(cli)?;
    let shape = config.cache.validate().map_err(CliError::Shape)?;
    info!(%shape, trace = %cli.trace.display(), "starting simulation");

    let reader = TraceReader::open(&cli.trace).map_err(CliError::Open)?;
    let mut sim = Simulator::new(shape);
    let verbose = config.general.verbose;
    let mut echoed = Ok(());
    let stats = sim
        .run(reader, |event, replay| {
            if verbose && echoed.is_ok() {
                echoed = echo(&mut *out, event, replay);
            }
        })
        .map_err(|source| CliError::Replay {
            path: cli.trace.clone(),
            source,
        })?;
    echoed?;

    report(cli, &stats, out)?;
    Ok(stats)
}

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Builds the run configuration from either the JSON file or the shape flags.
///
/// `-v` turns verbose output on even when the file leaves it off.
fn resolve_config(cli: &Cli) -> Result<Config, CliError> {
    let mut config = match (&cli.config, cli.set_bits, cli.ways, cli.block_bits) {
        (Some(path), ..) => Config::from_file(path).map_err(CliError::Load)?,
        (None, Some(s), Some(e), Some(b)) => Config {
            cache: CacheConfig::new(s, e, b),
            general: GeneralConfig::default(),
        },
        _ => return Err(CliError::MissingShape),
    };
    config.general.verbose |= cli.verbose;
    Ok(config)
}

/// Writes one verbose line, e.g. `M 20,1 miss hit`. Instruction fetches are not echoed.
fn echo(out: &mut impl Write, event: &TraceEvent, replay: &Replay) -> io::Result<()> {
    if matches!(replay, Replay::Skipped) {
        return Ok(());
    }
    writeln!(out, "{event} {replay}")
}

/// Writes the final counts and the results file if one was requested.
fn report(cli: &Cli, stats: &SimStats, out: &mut impl Write) -> Result<(), CliError> {
    if cli.json {
        writeln!(out, "{}", serde_json::to_string(stats)?)?;
    } else {
        stats.write_summary(out)?;
    }

    if let Some(path) = &cli.results {
        stats
            .write_results(path)
            .map_err(|source| CliError::Results {
                path: path.clone(),
                source,
            })?;
    }
    Ok(())
}
