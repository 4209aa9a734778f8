// wayfinder_sim/src/lib.rs

use bevy::prelude::*;

// Import the plugins defined within the simulation crate.
use crate::simulation::core::simulation_setup::SimulationSetupPlugin;
use crate::simulation::plugins::building::BuildingPlugin;
use crate::simulation::plugins::navigation::NavigationPlugin;
use crate::simulation::plugins::supervision::SupervisionPlugin;
use crate::simulation::plugins::walker::WalkerPlugin;

// This prelude is for convenience for other files WITHIN the wayfinder_sim crate.
pub mod prelude;

// This module contains all the simulation-specific logic.
pub mod cli;
pub mod simulation;

/// The main plugin that brings together all the simulation parts.
/// `main.rs` and the tests add this one plugin to a headless Bevy App.
pub struct WayfinderSimulationPlugin;

impl Plugin for WayfinderSimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            // Core setup (resources, clock, sets). Must come first.
            SimulationSetupPlugin,
            // Loads floor datasets into the Building resource.
            BuildingPlugin,
            // Plans the trip and drives the session.
            NavigationPlugin,
            // The simulated pedestrian and its sensors.
            WalkerPlugin,
            // Arrival, timeout and the final summary.
            SupervisionPlugin,
        ));
    }
}
