// wayfinder_sim/src/simulation/plugins/navigation/mod.rs

pub mod scripted;
mod systems;

use crate::prelude::*;
use systems::{
    guidance_tick_system, hud_log_system, start_guidance_system, test_mode_driver_system,
    TestModeDriver,
};

/// Plans the configured trip, starts the session and ticks it every frame.
pub struct NavigationPlugin;

impl Plugin for NavigationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TestModeDriver>()
            .add_systems(OnEnter(SimState::Planning), start_guidance_system)
            .add_systems(
                Update,
                (
                    // Scripted test-mode commands stand in for the walker's sensors.
                    test_mode_driver_system
                        .in_set(SimulationSet::Sensors)
                        .run_if(|config: Res<ScenarioConfig>| config.test_mode.enabled),
                    guidance_tick_system.in_set(SimulationSet::Guidance),
                    hud_log_system
                        .in_set(SimulationSet::Guidance)
                        .after(guidance_tick_system),
                )
                    .run_if(in_state(SimState::Navigating)),
            );
    }
}
