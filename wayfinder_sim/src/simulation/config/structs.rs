// wayfinder_sim/src/simulation/config/structs.rs

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use wayfinder_core::session::{PermissionState, SessionConfig};
use wayfinder_core::types::FloorId;

// =========================================================================
// == Top-Level Configuration Resource ==
// =========================================================================

/// # ScenarioConfig
/// The Bevy resource holding all configuration for one simulated walk.
/// This struct is the root of the data parsed from a scenario TOML file.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub simulation: Simulation,

    #[serde(default)]
    pub building: BuildingConfig,

    #[serde(default)]
    pub trip: TripConfig,

    #[serde(default)]
    pub walker: WalkerConfig,

    /// Passed straight to the core `NavigationSession`.
    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub collaborators: CollaboratorsConfig,

    #[serde(default)]
    pub test_mode: TestModeScript,
}

// =========================================================================
// == Configuration Sub-Structs ==
// =========================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Simulation {
    /// Optional seed for the pseudo-random number generator for determinism.
    pub seed: Option<u64>,
    /// Walks longer than this end as timed out, seconds.
    pub duration_seconds: f64,
    /// Guidance frames per simulated second.
    pub frame_rate_hz: f64,
    /// Orientation and motion samples per simulated second.
    pub sensor_rate_hz: f64,
    /// Tracked distance below which the walk counts as arrived, meters.
    pub arrival_radius_m: f64,
}

impl Default for Simulation {
    fn default() -> Self {
        Self {
            seed: None,
            duration_seconds: 120.0,
            frame_rate_hz: 30.0,
            sensor_rate_hz: 50.0,
            arrival_radius_m: 1.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildingConfig {
    /// Directory holding `floor_<N>/` and `test_area/` dataset folders.
    pub data_dir: PathBuf,
    /// Floors to load. Empty means every floor folder found under `data_dir`.
    #[serde(default)]
    pub floors: Vec<FloorId>,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            data_dir: "assets/data".into(),
            floors: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TripConfig {
    pub source: Option<String>,
    pub destination: String,
    /// A decoded QR payload. Takes precedence over `source`.
    pub qr_payload: Option<String>,
}

/// The simulated pedestrian.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WalkerConfig {
    /// Steps per second.
    pub cadence_hz: f64,
    /// The walker's real stride, which the tracker does not know, meters.
    pub stride_m: f64,
    /// Height of the heel-strike spike above gravity, m/s².
    pub step_amplitude: f64,
    /// Slow body sway added to the magnitude between strikes, m/s².
    pub sway_amplitude: f64,
    /// Standard deviation of accelerometer noise per axis, m/s².
    pub accel_noise_std: f64,
    /// Standard deviation of compass noise, degrees.
    pub heading_noise_std_deg: f64,
    /// A waypoint counts as reached within this distance, meters.
    pub waypoint_tolerance_m: f64,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            cadence_hz: 1.8,
            stride_m: 0.72,
            step_amplitude: 4.0,
            sway_amplitude: 0.3,
            accel_noise_std: 0.05,
            heading_noise_std_deg: 2.0,
            waypoint_tolerance_m: 0.4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraOutcome {
    #[default]
    Available,
    Denied,
    Unavailable,
}

/// How the scripted platform answers the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollaboratorsConfig {
    pub camera: CameraOutcome,
    pub orientation: PermissionState,
}

impl Default for CollaboratorsConfig {
    fn default() -> Self {
        Self {
            camera: CameraOutcome::Available,
            orientation: PermissionState::NotRequired,
        }
    }
}

/// Drives the session's test-mode controls instead of the walker's sensors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TestModeScript {
    pub enabled: bool,
    /// Simulated seconds between walk-forward commands.
    pub walk_interval_s: f64,
}

impl Default for TestModeScript {
    fn default() -> Self {
        Self {
            enabled: false,
            walk_interval_s: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_sections_fall_back_to_defaults() {
        let config: ScenarioConfig = toml::from_str(
            r#"
            [simulation]
            seed = 7
            duration_seconds = 30.0
            frame_rate_hz = 20.0
            sensor_rate_hz = 40.0
            arrival_radius_m = 1.0

            [trip]
            source = "entrance"
            destination = "library"

            [session.tracker]
            stride_m = 0.75

            [collaborators]
            camera = "denied"
            orientation = "granted"
            "#,
        )
        .unwrap();

        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.trip.destination, "library");
        assert_eq!(config.session.tracker.stride_m, 0.75);
        assert_eq!(config.session.step_detector.history_len, 10);
        assert_eq!(config.collaborators.camera, CameraOutcome::Denied);
        assert_eq!(config.collaborators.orientation, PermissionState::Granted);
        assert_eq!(config.walker.cadence_hz, 1.8);
        assert!(config.building.floors.is_empty());
    }

    #[test]
    fn floors_accept_numbers_and_test_area() {
        let config: ScenarioConfig = toml::from_str(
            r#"
            [building]
            data_dir = "data"
            floors = [2, "test_area", "floor_1"]
            "#,
        )
        .unwrap();
        assert_eq!(
            config.building.floors,
            vec![FloorId::Level(2), FloorId::TestArea, FloorId::Level(1)]
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<ScenarioConfig, _> = toml::from_str("[walker]\nspeed = 3.0\n");
        assert!(result.is_err());
    }
}
