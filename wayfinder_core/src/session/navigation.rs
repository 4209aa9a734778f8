// wayfinder_core/src/session/navigation.rs

use std::fmt;
use std::mem;
use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError, TrySendError};

use nalgebra::Point3;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::collaborators::{
    CameraError, CameraProvider, CameraStream, Permission, PermissionProvider,
};
use super::config::SessionConfig;
use super::error::SessionError;
use crate::building::LocationStore;
use crate::error::NavResult;
use crate::planning::{PlanResult, Route, RoutePlanner, RoutePreview};
use crate::projection::{ArFrame, ArProjector, FrameContext};
use crate::sensing::{AccelSample, HeadingSource, HeadingState, OrientationSample, StepDetector};
use crate::tracking::DeadReckoningTracker;
use crate::utils::geometry::planar_distance;

// =========================================================================
// == Sensor Plumbing ==
// =========================================================================

/// A raw sample pushed by a platform sensor callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorEvent {
    Orientation(OrientationSample),
    Motion(AccelSample),
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SensorPushError {
    #[error("sensor queue is full, sample dropped")]
    Full,
    #[error("navigation session is no longer active")]
    Closed,
}

/// Producer side of the session's sensor queue.
///
/// Orientation and motion share one FIFO, so the order samples arrive in is
/// the order they are applied. The queue closes when the session leaves the
/// active state.
#[derive(Debug, Clone)]
pub struct SensorSubscription {
    tx: SyncSender<SensorEvent>,
}

impl SensorSubscription {
    pub fn push(&self, event: SensorEvent) -> Result<(), SensorPushError> {
        self.tx.try_send(event).map_err(|e| match e {
            TrySendError::Full(_) => SensorPushError::Full,
            TrySendError::Disconnected(_) => SensorPushError::Closed,
        })
    }

    pub fn orientation(&self, sample: OrientationSample) -> Result<(), SensorPushError> {
        self.push(SensorEvent::Orientation(sample))
    }

    pub fn motion(&self, sample: AccelSample) -> Result<(), SensorPushError> {
        self.push(SensorEvent::Motion(sample))
    }
}

// =========================================================================
// == Session State ==
// =========================================================================

/// Whether live orientation samples are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrientationAccess {
    Granted,
    /// Permission was refused; the heading stays at its default.
    Denied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Planned,
    Active,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Planned => "planned",
            SessionPhase::Active => "active",
        };
        f.write_str(name)
    }
}

/// A computed trip waiting to be guided.
#[derive(Debug, Clone)]
pub struct PlannedTrip {
    pub plan: PlanResult,
    pub preview: RoutePreview,
}

/// Simulated inputs used instead of live sensors for display.
#[derive(Debug, Clone)]
struct TestMode {
    enabled: bool,
    position: Point3<f64>,
    waypoint_index: usize,
}

/// Result of one simulated walk command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestWalk {
    pub position: Point3<f64>,
    pub waypoint_index: usize,
    /// Index of the last waypoint.
    pub last_index: usize,
    /// False when already at the last waypoint and nothing moved.
    pub moved: bool,
}

impl TestWalk {
    pub fn label(&self) -> String {
        format!("Waypoint {}/{}", self.waypoint_index, self.last_index)
    }
}

struct ActiveGuidance {
    trip: PlannedTrip,
    camera: Box<dyn CameraStream>,
    sensors: Receiver<SensorEvent>,
    orientation: OrientationAccess,
    heading: HeadingState,
    steps: StepDetector,
    tracker: DeadReckoningTracker,
    test_mode: TestMode,
    dropped_events: u64,
}

impl ActiveGuidance {
    fn drain_sensors(&mut self) {
        loop {
            match self.sensors.try_recv() {
                Ok(SensorEvent::Orientation(sample)) => {
                    if self.orientation == OrientationAccess::Granted {
                        self.heading.apply(&sample);
                    }
                }
                Ok(SensorEvent::Motion(sample)) => {
                    if self.steps.process(&sample).is_some() {
                        self.tracker.on_step(self.heading.sensor_degrees());
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    /// Position and distance shown to the user.
    fn display_position(&self) -> (Point3<f64>, f64) {
        if self.test_mode.enabled {
            let dest = self.trip.plan.destination().pos;
            let pos = self.test_mode.position;
            (pos, planar_distance(&pos, &dest))
        } else {
            (
                self.tracker.position(),
                self.tracker.distance_to_destination(),
            )
        }
    }

    fn release(mut self) {
        self.camera.stop();
        if self.dropped_events > 0 {
            debug!("{} sensor events were dropped", self.dropped_events);
        }
    }
}

enum SessionState {
    Idle,
    Planned(PlannedTrip),
    Active(Box<ActiveGuidance>),
}

/// Snapshot of the session for status lines and logs.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStatus {
    pub phase: SessionPhase,
    pub steps: u64,
    /// Present only while active.
    pub position: Option<Point3<f64>>,
    pub heading_deg: f64,
    pub distance_to_destination: Option<f64>,
    pub test_mode: bool,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] steps {}", self.phase, self.steps)?;
        if let Some(pos) = self.position {
            write!(f, ", at ({:.2}, {:.2})", pos.x, pos.z)?;
        }
        write!(f, ", heading {:.1}°", self.heading_deg)?;
        if let Some(d) = self.distance_to_destination {
            write!(f, ", {:.2} m to go", d)?;
        }
        Ok(())
    }
}

// =========================================================================
// == Navigation Session ==
// =========================================================================

/// Lifecycle of one guided trip: `Idle → Planned → Active → Idle`.
///
/// The camera stream, the sensor queue and all dead-reckoning state exist
/// only while active and are released on every path out of it.
pub struct NavigationSession {
    config: SessionConfig,
    projector: ArProjector,
    state: SessionState,
}

impl NavigationSession {
    pub fn new(config: SessionConfig) -> Self {
        let projector = ArProjector::new(config.projector.clone());
        Self {
            config,
            projector,
            state: SessionState::Idle,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn phase(&self) -> SessionPhase {
        match self.state {
            SessionState::Idle => SessionPhase::Idle,
            SessionState::Planned(_) => SessionPhase::Planned,
            SessionState::Active(_) => SessionPhase::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active(_))
    }

    /// The planned or guided trip, if any.
    pub fn trip(&self) -> Option<&PlannedTrip> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::Planned(trip) => Some(trip),
            SessionState::Active(active) => Some(&active.trip),
        }
    }

    pub fn route(&self) -> Option<&Route> {
        self.trip().map(|t| t.plan.route())
    }

    pub fn orientation_access(&self) -> Option<OrientationAccess> {
        match &self.state {
            SessionState::Active(active) => Some(active.orientation),
            _ => None,
        }
    }

    /// Plans a trip between two stored locations.
    ///
    /// Allowed while idle or planned; a new plan replaces the old one. A
    /// failed plan leaves the session unchanged.
    pub fn plan(
        &mut self,
        store: &LocationStore,
        source_id: &str,
        dest_id: &str,
    ) -> NavResult<RoutePreview> {
        if self.is_active() {
            return Err(SessionError::AlreadyActive.into());
        }

        let planner = RoutePlanner::new(store, self.config.planner);
        let plan = planner.plan_path(source_id, dest_id).map_err(|e| {
            warn!("Planning {} -> {} failed: {}", source_id, dest_id, e);
            e
        })?;
        let preview = RoutePreview::from_plan(&plan);
        info!(
            "Session planned: {} ({} waypoints)",
            preview.description, preview.waypoint_count
        );
        self.state = SessionState::Planned(PlannedTrip {
            plan,
            preview: preview.clone(),
        });
        Ok(preview)
    }

    /// Starts guidance for the planned trip.
    ///
    /// Opens the camera first; if that fails the trip is dropped and the
    /// session returns to idle. A refused orientation permission does not
    /// stop the start, the heading just stays at its default.
    pub fn start(
        &mut self,
        camera: &mut dyn CameraProvider,
        permissions: &mut dyn PermissionProvider,
    ) -> Result<SensorSubscription, SessionError> {
        let trip = match mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::Planned(trip) => trip,
            SessionState::Idle => return Err(SessionError::NoRoutePlanned),
            active @ SessionState::Active(_) => {
                self.state = active;
                warn!("Ignoring start request: guidance already active");
                return Err(SessionError::AlreadyActive);
            }
        };

        let stream = match camera.open(&self.config.camera) {
            Ok(stream) => stream,
            Err(e) => {
                warn!("Camera could not be opened, session back to idle: {}", e);
                return Err(match e {
                    CameraError::PermissionDenied => {
                        SessionError::PermissionDenied(Permission::Camera)
                    }
                    CameraError::Unavailable(reason) => SessionError::CameraUnavailable(reason),
                });
            }
        };
        let (width, height) = stream.resolution();
        debug!("Camera stream open at {}x{}", width, height);

        let orientation = if permissions.request(Permission::Orientation).allows() {
            OrientationAccess::Granted
        } else {
            warn!("Orientation permission denied; heading stays at its default");
            OrientationAccess::Denied
        };

        let (tx, rx) = mpsc::sync_channel(self.config.sensor_queue.max(1));
        let source = trip.plan.source().pos;
        let destination = trip.plan.destination().pos;
        let tracker = DeadReckoningTracker::new(self.config.tracker, source, destination);
        info!(
            "Guidance started toward '{}', initial distance {:.2} m",
            trip.plan.destination().name,
            tracker.distance_to_destination()
        );

        self.state = SessionState::Active(Box::new(ActiveGuidance {
            trip,
            camera: stream,
            sensors: rx,
            orientation,
            heading: HeadingState::new(),
            steps: StepDetector::new(self.config.step_detector.clone()),
            tracker,
            test_mode: TestMode {
                enabled: false,
                position: source,
                waypoint_index: 0,
            },
            dropped_events: 0,
        }));
        Ok(SensorSubscription { tx })
    }

    /// Applies queued sensor events in arrival order, then projects one frame.
    /// Returns `None` unless active.
    pub fn tick(&mut self) -> Option<ArFrame> {
        let SessionState::Active(active) = &mut self.state else {
            return None;
        };
        active.drain_sensors();

        let (position, distance) = active.display_position();
        let plan = &active.trip.plan;
        Some(self.projector.frame(&FrameContext {
            route: plan.route(),
            position,
            heading_deg: active.heading.degrees(),
            source: plan.source(),
            destination: plan.destination(),
            distance_to_destination: distance,
            step_count: active.steps.step_count(),
            test_mode: active.test_mode.enabled,
        }))
    }

    /// Leaves any state for idle, releasing the camera and sensor queue.
    pub fn exit(&mut self) {
        match mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::Active(active) => {
                info!(
                    "Guidance stopped after {} steps, {:.2} m from destination",
                    active.steps.step_count(),
                    active.tracker.distance_to_destination()
                );
                (*active).release();
            }
            SessionState::Planned(_) => debug!("Planned trip discarded"),
            SessionState::Idle => {}
        }
    }

    pub fn status(&self) -> SessionStatus {
        match &self.state {
            SessionState::Active(active) => {
                let (position, distance) = active.display_position();
                SessionStatus {
                    phase: SessionPhase::Active,
                    steps: active.steps.step_count(),
                    position: Some(position),
                    heading_deg: active.heading.degrees(),
                    distance_to_destination: Some(distance),
                    test_mode: active.test_mode.enabled,
                }
            }
            _ => SessionStatus {
                phase: self.phase(),
                steps: 0,
                position: None,
                heading_deg: 0.0,
                distance_to_destination: None,
                test_mode: false,
            },
        }
    }

    /// Counts a sample the producer had to drop because the queue was full.
    pub fn note_dropped_event(&mut self) {
        if let SessionState::Active(active) = &mut self.state {
            active.dropped_events += 1;
        }
    }

    // --- Test mode ---

    fn active_mut(&mut self) -> Result<&mut ActiveGuidance, SessionError> {
        match &mut self.state {
            SessionState::Active(active) => Ok(&mut **active),
            _ => Err(SessionError::NotActive),
        }
    }

    /// Switches display inputs to the simulated heading and position. Turning
    /// it on puts the simulated walker back at the source.
    pub fn set_test_mode(&mut self, enabled: bool) -> Result<(), SessionError> {
        let active = self.active_mut()?;
        if enabled {
            active.test_mode.position = active.trip.plan.source().pos;
            active.test_mode.waypoint_index = 0;
            active.heading.set_source(HeadingSource::Simulated);
        } else {
            active.heading.set_source(HeadingSource::Sensor);
        }
        active.test_mode.enabled = enabled;
        info!("Test mode {}", if enabled { "enabled" } else { "disabled" });
        Ok(())
    }

    pub fn toggle_test_mode(&mut self) -> Result<bool, SessionError> {
        let enabled = !self.active_mut()?.test_mode.enabled;
        self.set_test_mode(enabled)?;
        Ok(enabled)
    }

    pub fn is_test_mode(&self) -> bool {
        matches!(&self.state, SessionState::Active(a) if a.test_mode.enabled)
    }

    /// Turns the simulated heading counter-clockwise by one step.
    pub fn rotate_left(&mut self) -> Result<f64, SessionError> {
        let step = self.config.test_mode.rotate_step_deg;
        let heading = self.active_mut()?.heading.rotate(-step);
        debug!("Rotated left to {:.0}°", heading);
        Ok(heading)
    }

    pub fn rotate_right(&mut self) -> Result<f64, SessionError> {
        let step = self.config.test_mode.rotate_step_deg;
        let heading = self.active_mut()?.heading.rotate(step);
        debug!("Rotated right to {:.0}°", heading);
        Ok(heading)
    }

    /// Moves the simulated position toward the next waypoint by at most one
    /// walk step, advancing the waypoint index when it is reached.
    pub fn walk_forward(&mut self) -> Result<TestWalk, SessionError> {
        let max_step = self.config.test_mode.walk_step_m;
        let active = self.active_mut()?;
        let route = active.trip.plan.route();
        let last_index = route.len() - 1;
        let test = &mut active.test_mode;

        if test.waypoint_index >= last_index {
            debug!("Already at the last waypoint");
            return Ok(TestWalk {
                position: test.position,
                waypoint_index: test.waypoint_index,
                last_index,
                moved: false,
            });
        }

        let next = route.waypoints()[test.waypoint_index + 1];
        let to_next = planar_distance(&test.position, &next);
        if to_next <= max_step {
            test.position.x = next.x;
            test.position.z = next.z;
            test.waypoint_index += 1;
            debug!("Reached waypoint {}", test.waypoint_index);
        } else {
            let ratio = max_step / to_next;
            test.position.x += (next.x - test.position.x) * ratio;
            test.position.z += (next.z - test.position.z) * ratio;
        }

        Ok(TestWalk {
            position: test.position,
            waypoint_index: test.waypoint_index,
            last_index,
            moved: true,
        })
    }
}

impl Default for NavigationSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl fmt::Debug for NavigationSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationSession")
            .field("phase", &self.phase())
            .field("trip", &self.trip().map(|t| &t.preview.description))
            .finish()
    }
}
