// wayfinder_sim/src/simulation/core/events.rs
use bevy::prelude::Event;
// Import the pure data struct from the core library
use wayfinder_core::projection::ArFrame;

/// One overlay frame produced by the session, stamped with simulated time.
#[derive(Event, Clone, Debug)]
pub struct GuidanceFrame {
    pub time_ms: u64,
    pub frame: ArFrame,
}
