// wayfinder_sim/src/simulation/config/mod.rs

//! Loading the scenario file and discovering the floor datasets it points at.

mod discovery;

pub mod structs;

use figment::{
    providers::{Format, Toml},
    Figment,
};
use std::path::Path;

pub use discovery::discover_floors;
pub use structs::{
    BuildingConfig, CameraOutcome, CollaboratorsConfig, ScenarioConfig, Simulation, TestModeScript,
    TripConfig, WalkerConfig,
};

/// Reads a scenario TOML. Missing sections and keys take their defaults.
pub fn load_scenario(path: &Path) -> Result<ScenarioConfig, figment::Error> {
    if !path.is_file() {
        return Err(figment::Error::from(format!(
            "scenario file {} does not exist",
            path.display()
        )));
    }
    Figment::new().merge(Toml::file(path)).extract()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scenarios_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../assets/scenarios")
    }

    #[test]
    fn shipped_scenarios_parse() {
        for name in ["lobby_to_library.toml", "to_second_floor.toml", "test_mode_walk.toml"] {
            let config = load_scenario(&scenarios_dir().join(name)).unwrap();
            assert!(!config.trip.destination.is_empty(), "{name}");
        }
    }

    #[test]
    fn missing_scenario_is_an_error() {
        assert!(load_scenario(&scenarios_dir().join("nope.toml")).is_err());
    }
}
