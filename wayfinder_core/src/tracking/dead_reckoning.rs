// wayfinder_core/src/tracking/dead_reckoning.rs

use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::utils::geometry::planar_distance;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Distance covered per accepted step, meters.
    pub stride_m: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self { stride_m: 0.7 }
    }
}

/// Integrates fixed-length strides along the heading from a known start.
///
/// No absolute fix is ever applied, so error grows with the step count.
#[derive(Debug, Clone)]
pub struct DeadReckoningTracker {
    config: TrackerConfig,
    position: Point3<f64>,
    destination: Point3<f64>,
    distance_to_destination: f64,
    steps: u64,
}

impl DeadReckoningTracker {
    pub fn new(config: TrackerConfig, start: Point3<f64>, destination: Point3<f64>) -> Self {
        Self {
            config,
            position: start,
            destination,
            distance_to_destination: planar_distance(&start, &destination),
            steps: 0,
        }
    }

    /// Advances one stride along `heading_deg` (clockwise from `+z`).
    pub fn on_step(&mut self, heading_deg: f64) -> Point3<f64> {
        let heading = heading_deg.to_radians();
        self.position.x += self.config.stride_m * heading.sin();
        self.position.z += self.config.stride_m * heading.cos();
        self.distance_to_destination = planar_distance(&self.position, &self.destination);
        self.steps += 1;
        trace!(
            "Position ({:.2}, {:.2}) heading {:.1}°, {:.2} m to go",
            self.position.x,
            self.position.z,
            heading_deg,
            self.distance_to_destination
        );
        self.position
    }

    pub fn position(&self) -> Point3<f64> {
        self.position
    }

    pub fn destination(&self) -> Point3<f64> {
        self.destination
    }

    /// Planar distance from the estimate to the destination.
    pub fn distance_to_destination(&self) -> f64 {
        self.distance_to_destination
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }
}
