// wayfinder_sim/src/main.rs

//! Runs one scenario headlessly and exits when the walk is over.
//!
//! `cargo run -p wayfinder_sim -- --scenario assets/scenarios/to_second_floor.toml`

use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use clap::Parser;

use wayfinder_sim::cli::Cli;
use wayfinder_sim::prelude::SimState;
use wayfinder_sim::simulation::config::load_scenario;
use wayfinder_sim::WayfinderSimulationPlugin;

fn main() -> AppExit {
    let cli = Cli::parse();

    // --- 1. Load Scenario Configuration ---
    let mut config = match load_scenario(&cli.scenario) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Could not load scenario '{}': {}",
                cli.scenario.display(),
                e
            );
            return AppExit::error();
        }
    };
    if let Some(data_dir) = &cli.data_dir {
        config.building.data_dir = data_dir.clone();
    }
    if cli.seed.is_some() {
        config.simulation.seed = cli.seed;
    }

    let mut app = App::new();

    // --- 2. Headless Core Plugins & Resources ---
    app.add_plugins(
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::ZERO)),
    )
    .add_plugins(LogPlugin {
        level: bevy::log::Level::INFO,
        filter: "info,wayfinder_core=debug,wayfinder_sim=debug".to_string(),
        ..default()
    })
    .add_plugins(StatesPlugin)
    .insert_resource(cli)
    .insert_resource(config);

    app.init_state::<SimState>();

    // --- 3. Add the Main Simulation Plugin ---
    app.add_plugins(WayfinderSimulationPlugin);

    // --- 4. Run until the summary requests exit ---
    app.run()
}
