// wayfinder_core/src/lib.rs

//! Indoor positioning and guidance engine.
//!
//! Three algorithmic pieces live here: multi-floor route planning over named
//! locations, pedestrian dead reckoning from raw accelerometer and orientation
//! samples, and the pseudo-3D projection that turns a route into screen-space
//! overlay data anchored to the device heading. The [`session`] module ties
//! them together behind a small state machine.

pub mod building;
pub mod error;
pub mod planning;
pub mod prelude;
pub mod projection;
pub mod scan;
pub mod sensing;
pub mod session;
pub mod tracking;
pub mod types;
pub mod utils;
