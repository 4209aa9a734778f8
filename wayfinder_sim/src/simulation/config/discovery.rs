// wayfinder_sim/src/simulation/config/discovery.rs

use bevy::prelude::*;
use std::path::Path;
use walkdir::WalkDir;

use wayfinder_core::types::FloorId;

/// Walks the top level of `data_dir` and returns every folder whose name is a
/// floor id (`floor_<N>` or `test_area`), in floor order.
pub fn discover_floors(data_dir: &Path) -> Vec<FloorId> {
    if !data_dir.exists() {
        warn!(
            "Floor data directory not found at {:?}, no floors will be loaded.",
            data_dir
        );
        return Vec::new();
    }

    let mut floors: Vec<FloorId> = WalkDir::new(data_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_dir())
        .filter_map(|e| {
            let name = e.file_name().to_string_lossy().into_owned();
            match name.parse::<FloorId>() {
                Ok(floor) if floor.folder_name() == name => Some(floor),
                _ => {
                    debug!("Skipping {:?}: not a floor folder", e.path());
                    None
                }
            }
        })
        .collect();
    floors.sort();
    floors
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn finds_floor_folders_only() {
        let tmp = tempfile::tempdir().unwrap();
        for dir in ["floor_2", "test_area", "floor_1", "notes", "3"] {
            fs::create_dir_all(tmp.path().join(dir)).unwrap();
        }
        fs::write(tmp.path().join("floor_9"), "not a directory").unwrap();

        let floors = discover_floors(tmp.path());

        assert_eq!(
            floors,
            vec![FloorId::Level(1), FloorId::Level(2), FloorId::TestArea]
        );
    }

    #[test]
    fn missing_directory_yields_nothing() {
        assert!(discover_floors(Path::new("/definitely/not/here")).is_empty());
    }
}
