//! # traffic-cli
//!
//! Command-line driver for the traffic signal timing stack. Feeds lane
//! counts (synthetic or recorded) through a manager one step at a time and
//! prints or exports the forecasts and timings.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use traffic_facade::{RunConfig, SimulationLog, TrafficConfig, TrafficManager};

mod generator;
mod input;
mod output;

use generator::SyntheticStream;
use output::ExportFormat;

#[derive(Parser)]
#[command(name = "traffic")]
#[command(about = "Lane congestion forecasting and signal timing simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that writes results
#[derive(clap::Args)]
struct OutputArgs {
    /// Export file for the full run (JSON or CSV by extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Export format; with no output file the run is written to stdout
    #[arg(short, long, value_enum)]
    format: Option<ExportFormat>,

    /// Suppress per-step output
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run against a synthetic count stream
    Simulate {
        /// JSON run configuration; flags below override it
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of lanes
        #[arg(short, long)]
        lanes: Option<usize>,

        /// History window length
        #[arg(long)]
        history: Option<usize>,

        /// Signal cycle length in seconds
        #[arg(long)]
        cycle: Option<f64>,

        /// Steps to simulate
        #[arg(short, long)]
        steps: Option<usize>,

        /// Seed for reproducible streams
        #[arg(long)]
        seed: Option<u64>,

        /// Pause between steps in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Replay recorded counts (CSV with one column per lane, or JSON rows)
    Replay {
        /// Input file
        #[arg(short, long)]
        input: PathBuf,

        /// History window length
        #[arg(long)]
        history: Option<usize>,

        /// Signal cycle length in seconds
        #[arg(long)]
        cycle: Option<f64>,

        #[command(flatten)]
        out: OutputArgs,
    },
}

/// Feed every row through the manager, logging each step
fn drive<I>(
    manager: &mut TrafficManager,
    rows: I,
    delay: Duration,
    quiet: bool,
) -> Result<SimulationLog>
where
    I: IntoIterator<Item = Vec<f64>>,
{
    let mut log = SimulationLog::new();
    for (i, counts) in rows.into_iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            thread::sleep(delay);
        }
        let result = manager
            .simulate_step(&counts)
            .with_context(|| format!("Step {} rejected", i + 1))?;
        let step = log.push(result);
        if !quiet {
            let warming = !manager.estimator().history().is_warm();
            if let Some(logged) = log.last() {
                println!("{}", output::format_step(step, &logged.result, warming));
            }
        }
    }
    Ok(log)
}

fn finish(log: &SimulationLog, out: &OutputArgs) -> Result<()> {
    if !out.quiet && !log.is_empty() {
        println!("{}", output::format_summary(log));
    }
    output::export(log, out.output.as_deref(), out.format)
}

#[allow(clippy::too_many_arguments)]
fn run_simulate(
    config: Option<&Path>,
    lanes: Option<usize>,
    history: Option<usize>,
    cycle: Option<f64>,
    steps: Option<usize>,
    seed: Option<u64>,
    delay_ms: Option<u64>,
    out: OutputArgs,
) -> Result<()> {
    let mut run = match config {
        Some(path) => RunConfig::from_json_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => RunConfig::default(),
    };
    if let Some(lanes) = lanes {
        run.traffic.num_lanes = lanes;
    }
    if let Some(history) = history {
        run.traffic.history_length = history;
    }
    if let Some(cycle) = cycle {
        run.traffic.cycle_length = cycle;
    }
    if steps.is_some() {
        run.steps = steps;
    }
    if seed.is_some() {
        run.generator.seed = seed;
    }
    if let Some(delay_ms) = delay_ms {
        run.delay_ms = delay_ms;
    }
    run.validate()?;

    let mut manager = run.traffic.build_manager()?;
    let stream = SyntheticStream::new(run.traffic.num_lanes, run.generator.clone())?;
    tracing::info!(
        lanes = run.traffic.num_lanes,
        history = run.traffic.history_length,
        cycle = run.traffic.cycle_length,
        steps = run.steps(),
        base_counts = ?stream.base_counts(),
        "simulation started"
    );

    let log = drive(
        &mut manager,
        stream.take(run.steps()),
        Duration::from_millis(run.delay_ms),
        out.quiet,
    )?;
    finish(&log, &out)
}

fn run_replay(
    path: &Path,
    history: Option<usize>,
    cycle: Option<f64>,
    out: OutputArgs,
) -> Result<()> {
    let rows = input::load_counts(path)?;
    let defaults = TrafficConfig::default();
    let config = TrafficConfig::new(
        rows[0].len(),
        history.unwrap_or(defaults.history_length),
        cycle.unwrap_or(defaults.cycle_length),
    );
    let mut manager = config.build_manager()?;
    tracing::info!(
        input = %path.display(),
        rows = rows.len(),
        lanes = config.num_lanes,
        "replay started"
    );

    let log = drive(&mut manager, rows, Duration::ZERO, out.quiet)?;
    finish(&log, &out)
}

fn main() -> Result<()> {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "traffic_cli=info,traffic_core=warn".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            config,
            lanes,
            history,
            cycle,
            steps,
            seed,
            delay_ms,
            out,
        } => run_simulate(
            config.as_deref(),
            lanes,
            history,
            cycle,
            steps,
            seed,
            delay_ms,
            out,
        ),

        Commands::Replay {
            input,
            history,
            cycle,
            out,
        } => run_replay(&input, history, cycle, out),
    }
}
