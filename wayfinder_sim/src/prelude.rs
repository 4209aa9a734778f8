// wayfinder_sim/src/prelude.rs

// Re-export the entire Bevy prelude for convenience.
pub use bevy::prelude::*;

// Re-export the entire wayfinder_core prelude so plugins can reach pure types
// like `Building`, `Route` and `NavigationSession` directly.
pub use wayfinder_core::prelude::*;

// Re-export common simulation-specific types for easy access in other plugins.
pub use crate::simulation::config::structs::*;
pub use crate::simulation::core::app_state::{SimState, SimulationSet};
pub use crate::simulation::core::clock::SimClock;
pub use crate::simulation::core::events::GuidanceFrame;
pub use crate::simulation::core::feed::SensorFeed;
pub use crate::simulation::core::prng::SimulationRng;
pub use crate::simulation::core::summary::{FinishReason, RunSummary};
