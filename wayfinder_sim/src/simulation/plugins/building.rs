// wayfinder_sim/src/simulation/plugins/building.rs

use crate::prelude::*;
use crate::simulation::config::discover_floors;

// =========================================================================
// == Building Plugin ==
// =========================================================================

pub struct BuildingPlugin;

impl Plugin for BuildingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(SimState::Loading), load_building_system);
    }
}

/// Loads every configured floor (or every floor folder found) into the
/// `Building` resource, then moves on to planning.
///
/// A floor that fails to load is reported and skipped. Only an empty
/// building ends the run here.
fn load_building_system(
    config: Res<ScenarioConfig>,
    mut building: ResMut<Building>,
    mut summary: ResMut<RunSummary>,
    mut next_state: ResMut<NextState<SimState>>,
) {
    let data_dir = &config.building.data_dir;
    let floors = if config.building.floors.is_empty() {
        let found = discover_floors(data_dir);
        info!(
            "[LOADING] Discovered {} floor folder(s) under {}",
            found.len(),
            data_dir.display()
        );
        found
    } else {
        config.building.floors.clone()
    };

    let source = DirectoryFloorSource::new(data_dir.clone());
    let report = building.load_floors(floors, &source);
    for failure in &report.failed {
        warn!("[LOADING] {}", failure);
    }
    info!("[LOADING] {}", report.status_line());

    for group in building.selection_groups() {
        debug!(
            "[LOADING] {}: {}",
            group.label,
            group
                .entries
                .iter()
                .map(|(id, name)| format!("{name} ({id})"))
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    if report.loaded.is_empty() {
        summary.finish(FinishReason::NoMapData);
        next_state.set(SimState::Finished);
    } else {
        next_state.set(SimState::Planning);
    }
}
