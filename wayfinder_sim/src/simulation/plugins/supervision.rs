// wayfinder_sim/src/simulation/plugins/supervision.rs

use crate::prelude::*;
use crate::simulation::plugins::walker::Walker;

/// Decides when a run is over and writes its summary.
pub struct SupervisionPlugin;

impl Plugin for SupervisionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            supervision_system
                .in_set(SimulationSet::Supervision)
                .run_if(in_state(SimState::Navigating)),
        )
        .add_systems(OnEnter(SimState::Finished), finish_run_system);
    }
}

/// Ends guidance on arrival, on timeout, or when another system already
/// recorded a reason (the walker or test-mode driver running out of route).
fn supervision_system(
    config: Res<ScenarioConfig>,
    clock: Res<SimClock>,
    mut session: NonSendMut<NavigationSession>,
    mut summary: ResMut<RunSummary>,
    mut next_state: ResMut<NextState<SimState>>,
) {
    let status = session.status();
    if let Some(distance) = status.distance_to_destination {
        if distance < config.simulation.arrival_radius_m {
            info!(
                "[SUPERVISION] Within {:.2} m of the destination",
                config.simulation.arrival_radius_m
            );
            summary.finish(FinishReason::Arrived);
        }
    }
    if clock.elapsed_secs() >= config.simulation.duration_seconds {
        warn!(
            "[SUPERVISION] Scenario duration of {:.0} s elapsed",
            config.simulation.duration_seconds
        );
        summary.finish(FinishReason::TimedOut);
    }

    if summary.reason.is_some() {
        debug!("[SUPERVISION] Final status: {}", status);
        session.exit();
        next_state.set(SimState::Finished);
    }
}

fn finish_run_system(
    clock: Res<SimClock>,
    walker: Option<Res<Walker>>,
    mut feed: ResMut<SensorFeed>,
    mut session: NonSendMut<NavigationSession>,
    mut summary: ResMut<RunSummary>,
    mut exit: EventWriter<AppExit>,
) {
    // Planning failures arrive here without ever reaching the supervisor.
    session.exit();
    feed.detach();

    summary.elapsed_secs = clock.elapsed_secs();
    summary.sensor_samples = feed.pushed();
    summary.dropped_samples = feed.dropped();
    summary.truth = walker.map(|w| w.position());

    info!("[SUMMARY] {}", *summary);
    if summary.dropped_samples > 0 {
        warn!(
            "[SUMMARY] {} sensor samples were dropped on a full queue",
            summary.dropped_samples
        );
    }
    exit.write(AppExit::Success);
}
