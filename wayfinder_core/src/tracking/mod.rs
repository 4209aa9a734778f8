// wayfinder_core/src/tracking/mod.rs

mod dead_reckoning;

pub use dead_reckoning::{DeadReckoningTracker, TrackerConfig};
