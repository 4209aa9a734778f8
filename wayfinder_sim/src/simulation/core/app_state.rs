// wayfinder_sim/src/simulation/core/app_state.rs

use bevy::{ecs::schedule::SystemSet, prelude::States};

/// Defines the major phases of one simulated walk.
#[derive(States, Debug, Clone, Eq, PartialEq, Hash, Default)]
pub enum SimState {
    /// The initial state. Floor datasets are read from disk.
    #[default]
    Loading,

    /// The trip is resolved, planned and guidance is started.
    Planning,

    /// The walker moves and the session is ticked once per frame.
    Navigating,

    /// The summary is written and the app asked to exit.
    Finished,
}

// =========================================================================
// == Per-Frame Sets (The "Data Flow Graph") ==
// =========================================================================

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Advances the simulated clock. Runs first.
    Clock,
    /// Moves the walker and pushes its sensor samples into the session.
    Sensors,
    /// Ticks the session and publishes the guidance frame.
    Guidance,
    /// Arrival and timeout checks. Runs last.
    Supervision,
}
