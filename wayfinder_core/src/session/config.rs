// wayfinder_core/src/session/config.rs

use serde::{Deserialize, Serialize};

use super::collaborators::CameraRequest;
use crate::planning::PlannerConfig;
use crate::projection::ProjectorConfig;
use crate::sensing::StepDetectorConfig;
use crate::tracking::TrackerConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestModeConfig {
    /// Simulated turn per rotate command, degrees.
    pub rotate_step_deg: f64,
    /// Longest simulated walk per command, meters.
    pub walk_step_m: f64,
}

impl Default for TestModeConfig {
    fn default() -> Self {
        Self {
            rotate_step_deg: 15.0,
            walk_step_m: 5.0,
        }
    }
}

/// Every tunable of a navigation session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub planner: PlannerConfig,
    pub step_detector: StepDetectorConfig,
    pub tracker: TrackerConfig,
    pub projector: ProjectorConfig,
    pub test_mode: TestModeConfig,
    pub camera: CameraRequest,
    /// Capacity of the sensor event queue between ticks.
    pub sensor_queue: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            planner: PlannerConfig::default(),
            step_detector: StepDetectorConfig::default(),
            tracker: TrackerConfig::default(),
            projector: ProjectorConfig::default(),
            test_mode: TestModeConfig::default(),
            camera: CameraRequest::default(),
            sensor_queue: 256,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"tracker":{"stride_m":0.8},"sensor_queue":16}"#).unwrap();
        assert_eq!(config.tracker.stride_m, 0.8);
        assert_eq!(config.sensor_queue, 16);
        assert_eq!(config.step_detector.refractory_ms, 300);
        assert_eq!(config.camera.ideal_width, 1280);
    }
}
