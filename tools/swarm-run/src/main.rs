//! swarm-run: headless runner for the drone swarm simulation.
//!
//! Usage:
//!   swarm-run run --scenario scenarios/demo.yaml --steps 500 --save run.json
//!   swarm-run resume --snapshot run.json
//!   swarm-run defaults > scenario.yaml

mod logging;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use swarm_core::state::Statistics;
use swarm_sim::persistence::{config_to_yaml, load_config, load_snapshot, save_snapshot};
use swarm_sim::{SimError, SwarmEngine};

use crate::logging::{init_logging, LogFormat};

#[derive(Debug, Parser)]
#[command(name = "swarm-run", version, about = "Headless drone swarm simulation runner")]
struct Cli {
    /// Verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides it.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log line format: text or json.
    #[arg(long, default_value = "text", global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a scenario file from the first tick.
    Run {
        /// Scenario config (.yaml, or .json).
        #[arg(short, long)]
        scenario: PathBuf,
        /// Stop after this many ticks even if the run is not complete.
        #[arg(long)]
        steps: Option<u64>,
        /// Write a snapshot here when the run stops.
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Continue a run from a saved snapshot.
    Resume {
        #[arg(long)]
        snapshot: PathBuf,
        #[arg(long)]
        steps: Option<u64>,
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Print the default configuration as YAML.
    Defaults,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_format);

    let result = match cli.command {
        Command::Run {
            scenario,
            steps,
            save,
        } => cmd_run(&scenario, steps, save.as_deref()),
        Command::Resume {
            snapshot,
            steps,
            save,
        } => cmd_resume(&snapshot, steps, save.as_deref()),
        Command::Defaults => cmd_defaults(),
    };

    if let Err(e) = result {
        error!(error = %e, "swarm-run failed");
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn cmd_run(scenario: &Path, steps: Option<u64>, save: Option<&Path>) -> Result<(), SimError> {
    let config = load_config(scenario)?;
    info!(scenario = %scenario.display(), seed = config.seed, "scenario loaded");
    let engine = SwarmEngine::new(config)?;
    drive(engine, steps, save)
}

fn cmd_resume(snapshot: &Path, steps: Option<u64>, save: Option<&Path>) -> Result<(), SimError> {
    let engine = SwarmEngine::restore(load_snapshot(snapshot)?)?;
    info!(snapshot = %snapshot.display(), tick = engine.time().tick, "snapshot loaded");
    drive(engine, steps, save)
}

fn cmd_defaults() -> Result<(), SimError> {
    let yaml = config_to_yaml(&swarm_core::config::SwarmConfig::default())?;
    print!("{yaml}");
    Ok(())
}

/// Step until complete or until `steps` more ticks have run, then report.
fn drive(mut engine: SwarmEngine, steps: Option<u64>, save: Option<&Path>) -> Result<(), SimError> {
    let mut remaining = steps.unwrap_or(u64::MAX);
    while remaining > 0 && !engine.is_complete() {
        for event in engine.step() {
            tracing::debug!(tick = engine.time().tick, ?event, "event");
        }
        remaining -= 1;
    }

    let stats = engine.statistics();
    report(&stats, engine.is_complete())?;

    if let Some(path) = save {
        save_snapshot(path, &engine.snapshot())?;
        info!(path = %path.display(), tick = engine.time().tick, "snapshot saved");
    }
    Ok(())
}

fn report(stats: &Statistics, complete: bool) -> Result<(), SimError> {
    let json = serde_json::to_string_pretty(stats).map_err(|e| SimError::Format(e.to_string()))?;
    println!("{json}");
    if complete {
        info!(tick = stats.step_count, "run complete");
    } else {
        info!(tick = stats.step_count, "run paused before completion");
    }
    Ok(())
}
