// wayfinder_sim/src/cli.rs

use bevy::prelude::Resource;
use clap::Parser;
use std::path::PathBuf;

/// Wayfinder: replays a simulated indoor walk against the guidance engine.
///
/// This struct defines the command-line arguments accepted by the
/// `wayfinder_sim` binary.
#[derive(Parser, Debug, Resource, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The path to the scenario TOML file to run.
    #[arg(short, long, default_value = "assets/scenarios/lobby_to_library.toml")]
    pub scenario: PathBuf,

    /// Overrides the floor dataset directory from the scenario.
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Overrides the PRNG seed from the scenario.
    #[arg(long)]
    pub seed: Option<u64>,
}
