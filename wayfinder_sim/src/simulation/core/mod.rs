// wayfinder_sim/src/simulation/core/mod.rs

pub mod app_state;
pub mod clock;
pub mod events;
pub mod feed;
pub mod prng;
pub mod simulation_setup;
pub mod summary;
