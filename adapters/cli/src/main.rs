#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a scripted game of Waypoint Defence.

mod ascii;
mod tower_spec;

use std::{fs, path::PathBuf, thread};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use waypoint_defence_core::Event;
use waypoint_defence_runtime::{EngineConfig, Simulation};
use waypoint_defence_world::query;

use tower_spec::TowerSpec;

/// Headless tower defence runner.
#[derive(Debug, Parser)]
#[command(name = "waypoint-defence", version, about, long_about = None)]
struct Args {
    /// Tower to place before the game starts, written as KIND@COLUMN,ROW.
    #[arg(long = "tower", value_name = "KIND@COLUMN,ROW")]
    towers: Vec<TowerSpec>,

    /// Maximum number of ticks to simulate.
    #[arg(long, default_value_t = 6_000)]
    ticks: u32,

    /// Pace the simulation in real time instead of running as fast as possible.
    #[arg(long)]
    realtime: bool,

    /// Engine configuration file in TOML format.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Overrides the wave seed from the configuration.
    #[arg(long)]
    seed: Option<u64>,

    /// Overrides the tick rate from the configuration.
    #[arg(long, value_name = "HZ")]
    tick_rate: Option<u32>,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

/// Entry point for the Waypoint Defence command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(&args)?;
    let mut simulation =
        Simulation::new(&config).context("failed to initialise the simulation")?;

    for tower in &args.towers {
        simulation.submit(tower.command());
    }
    simulation.flush();
    report_placements(&simulation.drain_events());

    let tally = run(&mut simulation, args.ticks, args.realtime);

    let snapshot = simulation.snapshot();
    println!("{}", ascii::render_board(&snapshot));
    println!("{}", ascii::render_summary(&snapshot));
    println!(
        "kills:  {} defeated, {} escaped",
        tally.defeated, tally.escaped
    );
    Ok(())
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &Args) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            EngineConfig::from_toml_str(&source)
                .with_context(|| format!("failed to load config file {}", path.display()))?
        }
        None => EngineConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.wave_seed = seed;
    }
    if let Some(rate) = args.tick_rate {
        config.tick_rate_hz = rate;
    }
    config.validate().context("invalid engine configuration")?;
    Ok(config)
}

fn report_placements(events: &[Event]) {
    for event in events {
        match event {
            Event::TowerPlaced {
                kind, cell, cost, ..
            } => info!(%kind, column = cell.column(), row = cell.row(), cost, "tower placed"),
            Event::TowerPlacementRejected { kind, cell, reason } => warn!(
                %kind,
                column = cell.column(),
                row = cell.row(),
                %reason,
                "tower placement rejected"
            ),
            _ => {}
        }
    }
}

#[derive(Debug, Default)]
struct Tally {
    defeated: u32,
    escaped: u32,
}

fn run(simulation: &mut Simulation, ticks: u32, realtime: bool) -> Tally {
    let mut tally = Tally::default();
    let interval = simulation.tick_interval();

    for _ in 0..ticks {
        if realtime {
            thread::sleep(interval);
        }
        if !simulation.step() {
            break;
        }

        for event in simulation.drain_events() {
            match event {
                Event::EnemyDefeated { .. } => tally.defeated += 1,
                Event::EnemyEscaped { .. } => tally.escaped += 1,
                Event::WaveStarted { wave, enemies } => info!(wave, enemies, "wave started"),
                Event::StatusChanged { status } => info!(?status, "status changed"),
                _ => {}
            }
        }
    }

    let snapshot = simulation.snapshot();
    info!(
        status = ?query::status(&snapshot),
        elapsed = ?query::clock(&snapshot),
        "simulation finished"
    );
    tally
}
