//! Runs the tank without a window and prints the final snapshot as JSON.
//!
//! A simple autopilot plays the pointer: whenever a food charge is stored it
//! drops it on the smallest fish, so a run exercises feeding, reproduction,
//! predation and level progression end to end.

use std::path::PathBuf;

use aquarium::simulation::locatable::Locatable;
use aquarium::simulation::params::Params;
use aquarium::simulation::tank::{Notification, Tank};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "headless", about = "Run the aquarium without a window")]
struct Cli {
    /// JSON file with simulation parameters
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for a reproducible run
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Ticks to simulate
    #[arg(long, default_value_t = 20_000)]
    ticks: u32,
    /// Do not drop food automatically
    #[arg(long)]
    no_autopilot: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("aquarium=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let params = match &cli.config {
        Some(path) => Params::load_from_file(path)?,
        None => Params::default(),
    };

    let dt = params.tick_interval;
    let bounds = params.bounds();
    let mut tank = Tank::with_seed(params, cli.seed);
    let mut notifications = Vec::new();

    for _ in 0..cli.ticks {
        if !cli.no_autopilot && tank.panel.charges() > 0 {
            let target = tank
                .fish
                .iter()
                .min_by(|a, b| a.size.total_cmp(&b.size))
                .map(Locatable::center);
            if let Some(point) = target {
                tank.on_drag_release(point);
            }
        }

        tank.tick(dt, bounds);
        notifications.extend(tank.drain_notifications());

        if notifications
            .iter()
            .any(|n| matches!(n, Notification::Defeated { .. }))
        {
            break;
        }
    }

    for notification in &notifications {
        tracing::info!(?notification, "run milestone");
    }
    println!("{}", serde_json::to_string_pretty(&tank.snapshot())?);

    Ok(())
}
