// wayfinder_sim/src/simulation/plugins/navigation/systems.rs

use wayfinder_core::planning::PlanResult;
use wayfinder_core::utils::geometry::{bearing_degrees, relative_angle};

use super::scripted::{ScriptedCamera, ScriptedPermissions};
use crate::prelude::*;

// =========================================================================
// == Planning ==
// =========================================================================

/// Picks the source id: a scanned QR payload wins over the configured id.
fn resolve_source(trip: &TripConfig, store: &LocationStore) -> Result<String, String> {
    if let Some(payload) = &trip.qr_payload {
        let selection = resolve_scan(payload, store).map_err(|e| e.to_string())?;
        info!("[PLANNING] {}", selection.message());
        return Ok(selection.location.id.clone());
    }
    match &trip.source {
        Some(id) if !id.trim().is_empty() => Ok(id.trim().to_string()),
        _ => Err("Please select a source location.".to_string()),
    }
}

/// Runs once on entering `Planning`. Any failure is reported the way the
/// user would see it and ends the run.
pub(super) fn start_guidance_system(
    config: Res<ScenarioConfig>,
    building: Res<Building>,
    mut session: NonSendMut<NavigationSession>,
    mut feed: ResMut<SensorFeed>,
    mut summary: ResMut<RunSummary>,
    mut next_state: ResMut<NextState<SimState>>,
) {
    let mut fail = |reason: FinishReason| {
        error!("[PLANNING] {}", reason);
        summary.finish(reason);
        next_state.set(SimState::Finished);
    };

    let source_id = match resolve_source(&config.trip, building.locations()) {
        Ok(id) => id,
        Err(message) => return fail(FinishReason::PlanningFailed(message)),
    };
    let destination_id = config.trip.destination.trim();
    if destination_id.is_empty() {
        return fail(FinishReason::PlanningFailed(
            "Please select a destination.".to_string(),
        ));
    }

    let preview = match session.plan(building.locations(), &source_id, destination_id) {
        Ok(preview) => preview,
        Err(e) => return fail(FinishReason::PlanningFailed(e.to_string())),
    };
    info!("[PLANNING] {}", preview);
    if let Some(PlanResult::CrossFloor { connector, .. }) = session.trip().map(|t| &t.plan) {
        info!(
            "[PLANNING] Crossing floors via '{}' on floor {}",
            connector.name, connector.floor
        );
    }

    let mut camera = ScriptedCamera::new(config.collaborators.camera);
    let mut permissions = ScriptedPermissions::from_config(&config.collaborators);
    match session.start(&mut camera, &mut permissions) {
        Ok(subscription) => feed.attach(subscription),
        Err(e) => return fail(FinishReason::StartFailed(e.to_string())),
    }
    if session.orientation_access() == Some(OrientationAccess::Denied) {
        warn!("[PLANNING] Orientation denied, the estimate will not turn with the walker");
    }

    if config.test_mode.enabled {
        if let Err(e) = session.set_test_mode(true) {
            warn!("[PLANNING] Could not enable test mode: {}", e);
        }
    }

    next_state.set(SimState::Navigating);
}

// =========================================================================
// == Per-Frame Guidance ==
// =========================================================================

pub(super) fn guidance_tick_system(
    clock: Res<SimClock>,
    mut session: NonSendMut<NavigationSession>,
    mut summary: ResMut<RunSummary>,
    mut frames: EventWriter<GuidanceFrame>,
) {
    let Some(frame) = session.tick() else {
        return;
    };
    summary.frames += 1;
    summary.steps = frame.step_count;
    summary.estimate = Some(frame.position);
    summary.distance_to_destination = Some(frame.distance_to_destination);
    frames.write(GuidanceFrame {
        time_ms: clock.now_ms(),
        frame,
    });
}

/// Logs the overlay readout about once per simulated second.
pub(super) fn hud_log_system(
    mut frames: EventReader<GuidanceFrame>,
    mut last_logged_ms: Local<Option<u64>>,
) {
    for GuidanceFrame { time_ms, frame } in frames.read() {
        if (*last_logged_ms).is_some_and(|last| time_ms.saturating_sub(last) < 1000) {
            continue;
        }
        *last_logged_ms = Some(*time_ms);
        debug!(
            "[HUD] t={:.1}s {} | {} | steps {} | trail {} pts{}",
            *time_ms as f64 / 1000.0,
            frame.heading_readout(),
            frame.distance_label(),
            frame.step_count,
            frame.trail.len(),
            if frame.test_mode { " | TEST MODE" } else { "" }
        );
    }
}

// =========================================================================
// == Test Mode Driver ==
// =========================================================================

#[derive(Resource, Debug, Default)]
pub(super) struct TestModeDriver {
    next_command_ms: u64,
    waypoint_index: usize,
}

/// Turns the simulated heading toward the next waypoint, then walks forward,
/// once every `walk_interval_s`.
pub(super) fn test_mode_driver_system(
    config: Res<ScenarioConfig>,
    clock: Res<SimClock>,
    mut driver: ResMut<TestModeDriver>,
    mut session: NonSendMut<NavigationSession>,
    mut summary: ResMut<RunSummary>,
) {
    if !session.is_test_mode() || clock.now_ms() < driver.next_command_ms {
        return;
    }
    let interval_ms = (config.test_mode.walk_interval_s.max(0.0) * 1000.0) as u64;
    driver.next_command_ms = clock.now_ms() + interval_ms;

    let status = session.status();
    let target = session
        .route()
        .and_then(|route| route.waypoints().get(driver.waypoint_index + 1).copied());
    if let (Some(position), Some(target)) = (status.position, target) {
        let step = session.config().test_mode.rotate_step_deg.abs();
        let bearing = bearing_degrees(&position, &target);
        let mut heading = status.heading_deg;
        // A full turn is the most that can ever be needed.
        let max_turns = if step > 0.0 { (360.0 / step).ceil() as usize } else { 0 };
        for _ in 0..max_turns {
            let relative = relative_angle(bearing, heading);
            if relative.abs() <= step / 2.0 {
                break;
            }
            let turned = if relative > 0.0 {
                session.rotate_right()
            } else {
                session.rotate_left()
            };
            match turned {
                Ok(h) => heading = h,
                Err(_) => return,
            }
        }
    }

    match session.walk_forward() {
        Ok(walk) if walk.moved => {
            driver.waypoint_index = walk.waypoint_index;
            debug!(
                "[TEST MODE] {} at ({:.2}, {:.2})",
                walk.label(),
                walk.position.x,
                walk.position.z
            );
        }
        Ok(walk) => {
            info!("[TEST MODE] {} reached", walk.label());
            summary.finish(FinishReason::RouteCompleted);
        }
        Err(e) => warn!("[TEST MODE] {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn store() -> LocationStore {
        let mut store = LocationStore::new();
        store
            .register(Location::new(
                "lobby",
                "Lobby",
                FloorId::Level(1),
                Point3::origin(),
                LocationKind::Room,
            ))
            .unwrap();
        store
    }

    #[test]
    fn qr_payload_wins_over_configured_source() {
        let trip = TripConfig {
            source: Some("elsewhere".to_string()),
            destination: "x".to_string(),
            qr_payload: Some("  lobby ".to_string()),
        };
        assert_eq!(resolve_source(&trip, &store()), Ok("lobby".to_string()));
    }

    #[test]
    fn unknown_qr_payload_is_reported() {
        let trip = TripConfig {
            qr_payload: Some("nowhere".to_string()),
            ..Default::default()
        };
        assert_eq!(
            resolve_source(&trip, &store()),
            Err("Scanned invalid QR code: nowhere".to_string())
        );
    }

    #[test]
    fn missing_source_asks_for_one() {
        assert!(resolve_source(&TripConfig::default(), &store()).is_err());
    }
}
