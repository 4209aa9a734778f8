// wayfinder_sim/src/simulation/core/simulation_setup.rs

use crate::cli::Cli;
use crate::prelude::*;
use crate::simulation::core::clock::{advance_clock_system, SimClock};
use crate::simulation::core::events::GuidanceFrame;
use crate::simulation::core::feed::SensorFeed;
use crate::simulation::core::prng::SimulationRng;
use crate::simulation::core::summary::RunSummary;

pub struct SimulationSetupPlugin;

impl Plugin for SimulationSetupPlugin {
    fn build(&self, app: &mut App) {
        // This plugin's job is to read the config and add the shared resources.
        let config = match app.world().get_resource::<ScenarioConfig>() {
            Some(config) => config.clone(),
            None => {
                warn!("No ScenarioConfig inserted before the simulation plugin, using defaults.");
                let config = ScenarioConfig::default();
                app.insert_resource(config.clone());
                config
            }
        };

        if let Some(cli) = app.world().get_resource::<Cli>() {
            info!("[SETUP] Scenario file: {}", cli.scenario.display());
        }
        info!(
            "[SETUP] Trip to '{}', seed {:?}, {:.0} Hz frames, {:.0} Hz sensors",
            config.trip.destination,
            config.simulation.seed,
            config.simulation.frame_rate_hz,
            config.simulation.sensor_rate_hz
        );

        match toml::to_string_pretty(&config) {
            Ok(text) => debug!("[SETUP] Resolved scenario:\n{}", text),
            Err(e) => warn!("[SETUP] Could not render the resolved scenario: {}", e),
        }

        // --- 1. Add the Deterministic PRNG Resource ---
        app.insert_resource(SimulationRng::from_seed(config.simulation.seed));

        // --- 2. Shared Resources & Events ---
        app.insert_resource(SimClock::from_config(&config))
            .init_resource::<Building>()
            .init_resource::<SensorFeed>()
            .init_resource::<RunSummary>()
            .add_event::<GuidanceFrame>();

        // The session owns the camera stream, which is tied to the main thread.
        app.insert_non_send_resource(NavigationSession::new(config.session.clone()));

        // --- 3. Per-Frame Data Flow ---
        app.configure_sets(
            Update,
            (
                SimulationSet::Clock,
                SimulationSet::Sensors,
                SimulationSet::Guidance,
                SimulationSet::Supervision,
            )
                .chain(),
        );

        app.add_systems(
            Update,
            advance_clock_system
                .in_set(SimulationSet::Clock)
                .run_if(in_state(SimState::Navigating)),
        );
    }
}
