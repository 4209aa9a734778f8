// wayfinder_sim/src/simulation/plugins/walker.rs

use nalgebra::Point3;
use rand::Rng;
use rand_distr::StandardNormal;
use std::f64::consts::TAU;

// --- Simulation Crate Imports ---
use crate::prelude::*;
use crate::simulation::core::app_state::SimulationSet;

// --- Core Library Imports ---
use wayfinder_core::session::SensorPushError;
use wayfinder_core::utils::geometry::{bearing_degrees, planar_distance};

const GRAVITY: f64 = 9.80665;

// =========================================================================
// == Walker Resource & Plugin ==
// =========================================================================

/// The simulated pedestrian. Follows the planned route at a steady pace and
/// is the ground truth the dead-reckoned estimate is compared against.
#[derive(Resource, Debug, Clone)]
pub struct Walker {
    position: Point3<f64>,
    heading_deg: f64,
    route: Vec<Waypoint>,
    /// Index of the waypoint being walked toward.
    target: usize,
    /// Fraction of the current stride, a heel strike happens at each wrap.
    phase: f64,
    strides: u64,
    next_sample_ms: u64,
    done: bool,
}

impl Walker {
    pub fn new(route: &[Waypoint]) -> Self {
        let position = route.first().copied().unwrap_or_else(Point3::origin);
        let mut walker = Self {
            position,
            heading_deg: 0.0,
            route: route.to_vec(),
            // The walker starts on the first waypoint.
            target: 1,
            phase: 0.0,
            strides: 0,
            next_sample_ms: 0,
            done: route.len() < 2,
        };
        walker.face_target();
        walker
    }

    pub fn position(&self) -> Point3<f64> {
        self.position
    }

    pub fn heading_deg(&self) -> f64 {
        self.heading_deg
    }

    pub fn strides(&self) -> u64 {
        self.strides
    }

    /// True once the last waypoint is reached.
    pub fn is_done(&self) -> bool {
        self.done
    }

    fn face_target(&mut self) {
        let Some(target) = self.route.get(self.target) else {
            return;
        };
        if planar_distance(&self.position, target) > 1e-9 {
            self.heading_deg = wrap_bearing(bearing_degrees(&self.position, target));
        }
    }

    /// Walks for `dt` seconds. Returns true if a heel strike happened.
    pub fn advance(&mut self, dt: f64, config: &WalkerConfig) -> bool {
        if self.done {
            return false;
        }

        let mut remaining = (config.cadence_hz * config.stride_m * dt).max(0.0);
        loop {
            let Some(target) = self.route.get(self.target).copied() else {
                self.done = true;
                break;
            };
            let to_target = planar_distance(&self.position, &target);
            if to_target <= remaining {
                self.position = target;
                remaining -= to_target;
                self.target += 1;
                continue;
            }
            // Corners may be cut, the last waypoint is always walked onto.
            let is_last = self.target + 1 >= self.route.len();
            if !is_last && to_target <= config.waypoint_tolerance_m {
                self.target += 1;
                continue;
            }
            let ratio = remaining / to_target;
            self.position.x += (target.x - self.position.x) * ratio;
            self.position.z += (target.z - self.position.z) * ratio;
            break;
        }
        self.face_target();

        if self.done {
            debug!("[WALKER] Route finished after {} strides", self.strides);
            return false;
        }

        self.phase += config.cadence_hz * dt;
        if self.phase >= 1.0 {
            self.phase -= self.phase.floor();
            self.strides += 1;
            true
        } else {
            false
        }
    }

    /// Noise-free acceleration magnitude for the current instant.
    fn accel_magnitude(&self, strike: bool, config: &WalkerConfig) -> f64 {
        let sway = if self.done {
            0.0
        } else {
            config.sway_amplitude * (TAU * self.phase).sin()
        };
        let spike = if strike { config.step_amplitude } else { 0.0 };
        GRAVITY + sway + spike
    }
}

fn wrap_bearing(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

pub struct WalkerPlugin;

impl Plugin for WalkerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(SimState::Navigating), spawn_walker_system)
            .add_systems(
                Update,
                walker_sensor_system
                    .in_set(SimulationSet::Sensors)
                    .run_if(in_state(SimState::Navigating))
                    .run_if(|config: Res<ScenarioConfig>| !config.test_mode.enabled),
            );
    }
}

// =========================================================================
// == Systems ==
// =========================================================================

fn spawn_walker_system(mut commands: Commands, session: NonSend<NavigationSession>) {
    let Some(route) = session.route() else {
        warn!("[WALKER] Navigating without a route, the walker stays put");
        return;
    };
    info!(
        "[WALKER] Starting at ({:.2}, {:.2}) along {} waypoints",
        route.first().x,
        route.first().z,
        route.len()
    );
    commands.insert_resource(Walker::new(route.waypoints()));
}

/// Moves the walker up to the current simulated time and pushes one
/// orientation and one motion sample per sensor period.
fn walker_sensor_system(
    config: Res<ScenarioConfig>,
    clock: Res<SimClock>,
    walker: Option<ResMut<Walker>>,
    mut rng: ResMut<SimulationRng>,
    mut feed: ResMut<SensorFeed>,
    mut session: NonSendMut<NavigationSession>,
    mut summary: ResMut<RunSummary>,
) {
    let Some(mut walker) = walker else {
        return;
    };
    let walker_config = &config.walker;
    let period_ms = clock.sensor_period_ms();
    let dt = period_ms as f64 / 1000.0;

    while walker.next_sample_ms <= clock.now_ms() {
        let t = walker.next_sample_ms;
        walker.next_sample_ms += period_ms;

        let strike = walker.advance(dt, walker_config);
        if strike {
            trace!("[WALKER] Heel strike {} at t={} ms", walker.strides(), t);
        }

        // --- Orientation ---
        let heading_noise: f64 = rng.0.sample(StandardNormal);
        let alpha = wrap_bearing(
            walker.heading_deg() + heading_noise * walker_config.heading_noise_std_deg,
        );

        // --- Motion ---
        let magnitude = walker.accel_magnitude(strike, walker_config);
        let mut noise = || -> f64 {
            let n: f64 = rng.0.sample(StandardNormal);
            n * walker_config.accel_noise_std
        };
        let sample = AccelSample::new(noise(), magnitude + noise(), noise(), t);

        for event in [
            SensorEvent::Orientation(OrientationSample::from_alpha(alpha, t)),
            SensorEvent::Motion(sample),
        ] {
            match feed.push(event) {
                Ok(()) => {}
                Err(SensorPushError::Full) => session.note_dropped_event(),
                Err(SensorPushError::Closed) => return,
            }
        }
    }

    if walker.is_done() {
        summary.finish(FinishReason::RouteCompleted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn config() -> WalkerConfig {
        WalkerConfig {
            cadence_hz: 2.0,
            stride_m: 0.5,
            ..Default::default()
        }
    }

    #[test]
    fn walks_the_route_at_cadence_times_stride() {
        let route = [Point3::origin(), Point3::new(3.0, 0.0, 0.0)];
        let mut walker = Walker::new(&route);
        assert_abs_diff_eq!(walker.heading_deg(), 90.0, epsilon = 1e-9);

        // 1 m/s for 2.2 s, sampled at 50 Hz.
        for _ in 0..110 {
            walker.advance(0.02, &config());
        }
        assert_abs_diff_eq!(walker.position().x, 2.2, epsilon = 1e-9);
        assert_eq!(walker.strides(), 4);
        assert!(!walker.is_done());
    }

    #[test]
    fn turns_at_corners_and_stops_at_the_end() {
        let route = [
            Point3::origin(),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
        ];
        let mut walker = Walker::new(&route);
        assert_abs_diff_eq!(walker.heading_deg(), 0.0, epsilon = 1e-9);

        walker.advance(1.5, &config());
        assert_abs_diff_eq!(walker.heading_deg(), 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(walker.position().x, 0.5, epsilon = 1e-9);

        walker.advance(1.0, &config());
        assert!(walker.is_done());
        assert_abs_diff_eq!(walker.position().x, 1.0, epsilon = 1e-9);
        assert!(!walker.advance(1.0, &config()));
    }

    #[test]
    fn ends_exactly_on_the_last_waypoint() {
        let route = [
            Point3::origin(),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(-0.3, 0.0, 2.2),
        ];
        let config = config();
        assert!(config.waypoint_tolerance_m > 0.0);
        let mut walker = Walker::new(&route);

        let mut steps = 0;
        while !walker.is_done() && steps < 1000 {
            walker.advance(0.02, &config);
            steps += 1;
        }
        assert!(walker.is_done());
        assert_abs_diff_eq!(walker.position().x, -0.3, epsilon = 1e-9);
        assert_abs_diff_eq!(walker.position().z, 2.2, epsilon = 1e-9);
    }

    #[test]
    fn strike_samples_stand_out_from_the_sway() {
        let walker = Walker::new(&[Point3::origin(), Point3::new(5.0, 0.0, 0.0)]);
        let config = WalkerConfig::default();
        let quiet = walker.accel_magnitude(false, &config);
        let strike = walker.accel_magnitude(true, &config);
        assert_abs_diff_eq!(strike - quiet, config.step_amplitude, epsilon = 1e-12);
        assert!(strike > 8.0 && strike < 20.0);
    }
}
