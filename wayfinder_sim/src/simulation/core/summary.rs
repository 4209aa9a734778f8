// wayfinder_sim/src/simulation/core/summary.rs

use std::fmt;

use bevy::prelude::Resource;
use nalgebra::Point3;

/// Why a run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum FinishReason {
    /// The tracked distance dropped below the arrival radius.
    Arrived,
    /// The walker reached the last waypoint first.
    RouteCompleted,
    TimedOut,
    /// Nothing could be loaded from the data directory.
    NoMapData,
    /// Trip resolution or planning failed, with the user-facing message.
    PlanningFailed(String),
    /// Guidance could not start, with the user-facing message.
    StartFailed(String),
}

impl FinishReason {
    /// True when guidance ran and ended at or near the destination.
    pub fn reached_goal(&self) -> bool {
        matches!(self, FinishReason::Arrived | FinishReason::RouteCompleted)
    }
}

impl fmt::Display for FinishReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinishReason::Arrived => f.write_str("arrived"),
            FinishReason::RouteCompleted => f.write_str("route completed"),
            FinishReason::TimedOut => f.write_str("timed out"),
            FinishReason::NoMapData => f.write_str("no map data"),
            FinishReason::PlanningFailed(msg) => write!(f, "planning failed: {msg}"),
            FinishReason::StartFailed(msg) => write!(f, "start failed: {msg}"),
        }
    }
}

/// Outcome of one simulated walk. `reason` is set once, by whichever
/// system ends the run.
#[derive(Resource, Debug, Clone, Default)]
pub struct RunSummary {
    pub reason: Option<FinishReason>,
    pub steps: u64,
    pub frames: u64,
    pub sensor_samples: u64,
    pub dropped_samples: u64,
    /// Dead-reckoned position at the last frame.
    pub estimate: Option<Point3<f64>>,
    /// Where the walker really was.
    pub truth: Option<Point3<f64>>,
    pub distance_to_destination: Option<f64>,
    pub elapsed_secs: f64,
}

impl RunSummary {
    /// Records the end reason unless one is already set.
    pub fn finish(&mut self, reason: FinishReason) {
        if self.reason.is_none() {
            self.reason = Some(reason);
        }
    }

    /// Planar distance between estimate and truth.
    pub fn drift(&self) -> Option<f64> {
        let (estimate, truth) = (self.estimate?, self.truth?);
        let dx = estimate.x - truth.x;
        let dz = estimate.z - truth.z;
        Some((dx * dx + dz * dz).sqrt())
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            Some(reason) => write!(f, "Run ended ({reason})")?,
            None => f.write_str("Run in progress")?,
        }
        write!(
            f,
            " after {:.1} s: {} steps, {} frames",
            self.elapsed_secs, self.steps, self.frames
        )?;
        if let Some(d) = self.distance_to_destination {
            write!(f, ", {:.2} m to go", d)?;
        }
        if let Some(drift) = self.drift() {
            write!(f, ", drift {:.2} m", drift)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn first_reason_sticks() {
        let mut summary = RunSummary::default();
        summary.finish(FinishReason::Arrived);
        summary.finish(FinishReason::TimedOut);
        assert_eq!(summary.reason, Some(FinishReason::Arrived));
    }

    #[test]
    fn drift_ignores_height() {
        let summary = RunSummary {
            estimate: Some(Point3::new(3.0, 5.0, 4.0)),
            truth: Some(Point3::origin()),
            ..Default::default()
        };
        assert_abs_diff_eq!(summary.drift().unwrap(), 5.0, epsilon = 1e-12);
        assert_eq!(RunSummary::default().drift(), None);
    }
}
