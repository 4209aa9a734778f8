// wayfinder_core/src/building/mod.rs

//! Loaded building data: the per-floor dataset arena and the global
//! location lookup table built from it.

mod floors;
mod store;

pub use floors::{DataLoadError, DirectoryFloorSource, FloorArena, FloorDataset, FloorSource, NavMesh};
pub use store::{LocationStore, StoreError};

use tracing::{debug, error, warn};

use crate::types::{FloorId, Location};

/// One floor's entry in the destination picker.
#[derive(Debug, Clone, PartialEq)]
pub struct FloorGroup {
    pub floor: FloorId,
    pub label: String,
    /// `(id, name)` pairs in dataset order.
    pub entries: Vec<(String, String)>,
}

/// Outcome of loading several floors at once.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: Vec<FloorId>,
    pub failed: Vec<DataLoadError>,
}

impl LoadReport {
    /// The status line shown once start-up loading settles.
    pub fn status_line(&self) -> String {
        if self.loaded.is_empty() {
            return "Ready, but no map data loaded.".to_string();
        }
        let floors: Vec<String> = self.loaded.iter().map(|f| f.to_string()).collect();
        format!("Ready. Loaded floors: {}.", floors.join(", "))
    }
}

/// Floor datasets plus the location table derived from them.
#[derive(Debug, Default, Clone)]
#[cfg_attr(feature = "bevy", derive(bevy_ecs::prelude::Resource))]
pub struct Building {
    floors: FloorArena,
    locations: LocationStore,
}

impl Building {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn floors(&self) -> &FloorArena {
        &self.floors
    }

    pub fn locations(&self) -> &LocationStore {
        &self.locations
    }

    /// Loads one floor through `source`, or returns the cached dataset.
    ///
    /// Every location in the dataset is registered in the global store. A
    /// dataset with an empty location id is rejected as a whole.
    pub fn load_floor(
        &mut self,
        floor: FloorId,
        source: &dyn FloorSource,
    ) -> Result<&FloorDataset, DataLoadError> {
        if self.floors.contains(floor) {
            debug!("Floor {} already loaded from cache", floor);
            return self.floors.get(floor).ok_or(DataLoadError::Invalid {
                floor,
                reason: "cached floor disappeared".to_string(),
            });
        }

        let dataset = source.fetch(floor).map_err(|e| {
            error!("{}", e);
            e
        })?;

        if dataset.locations.iter().any(|l| l.id.is_empty()) {
            let err = DataLoadError::Invalid {
                floor,
                reason: "a location has an empty id".to_string(),
            };
            error!("{}", err);
            return Err(err);
        }

        for location in &dataset.locations {
            if location.floor != floor {
                warn!(
                    "Location '{}' in the floor {} dataset declares floor {}",
                    location.id, floor, location.floor
                );
            }
            self.locations
                .register(location.clone())
                .map_err(|e| DataLoadError::Invalid {
                    floor,
                    reason: e.to_string(),
                })?;
        }
        debug!(
            "Floor {} stored. Total locations: {}",
            floor,
            self.locations.len()
        );
        Ok(self.floors.insert(dataset))
    }

    /// Loads several floors, collecting failures instead of stopping.
    pub fn load_floors(
        &mut self,
        floors: impl IntoIterator<Item = FloorId>,
        source: &dyn FloorSource,
    ) -> LoadReport {
        let mut report = LoadReport::default();
        for floor in floors {
            match self.load_floor(floor, source) {
                Ok(_) => report.loaded.push(floor),
                Err(e) => report.failed.push(e),
            }
        }
        report.loaded.sort();
        report
    }

    /// Locations offered as a starting point on `floor`, in dataset order.
    pub fn sources_on(&self, floor: FloorId) -> &[Location] {
        self.floors
            .get(floor)
            .map(|d| d.locations.as_slice())
            .unwrap_or(&[])
    }

    /// Destination choices grouped by floor, test area last.
    pub fn selection_groups(&self) -> Vec<FloorGroup> {
        self.floors
            .datasets()
            .map(|dataset| FloorGroup {
                floor: dataset.floor,
                label: dataset.floor.label(),
                entries: dataset
                    .locations
                    .iter()
                    .map(|l| (l.id.clone(), l.name.clone()))
                    .collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LocationKind;
    use nalgebra::Point3;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory source that counts fetches.
    struct MemorySource {
        floors: HashMap<FloorId, Vec<Location>>,
        fetches: AtomicUsize,
    }

    impl FloorSource for MemorySource {
        fn fetch(&self, floor: FloorId) -> Result<FloorDataset, DataLoadError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            let locations = self.floors.get(&floor).cloned().ok_or(DataLoadError::Invalid {
                floor,
                reason: "no such floor".to_string(),
            })?;
            Ok(FloorDataset {
                floor,
                locations,
                nav_mesh: NavMesh::default(),
            })
        }
    }

    fn source() -> MemorySource {
        let loc = |id: &str, floor| {
            Location::new(id, format!("Room {id}"), floor, Point3::origin(), LocationKind::Room)
        };
        let mut floors = HashMap::new();
        floors.insert(FloorId::Level(1), vec![loc("101", FloorId::Level(1)), loc("102", FloorId::Level(1))]);
        floors.insert(FloorId::Level(2), vec![loc("201", FloorId::Level(2))]);
        floors.insert(FloorId::TestArea, vec![loc("t1", FloorId::TestArea)]);
        MemorySource {
            floors,
            fetches: AtomicUsize::new(0),
        }
    }

    #[test]
    fn loaded_floors_are_never_fetched_twice() {
        let src = source();
        let mut building = Building::new();
        building.load_floor(FloorId::Level(1), &src).unwrap();
        building.load_floor(FloorId::Level(1), &src).unwrap();
        assert_eq!(src.fetches.load(Ordering::SeqCst), 1);
        assert_eq!(building.locations().len(), 2);
    }

    #[test]
    fn failed_floor_does_not_block_the_others() {
        let src = source();
        let mut building = Building::new();
        let report = building.load_floors(
            [FloorId::TestArea, FloorId::Level(3), FloorId::Level(1)],
            &src,
        );
        assert_eq!(report.loaded, vec![FloorId::Level(1), FloorId::TestArea]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].floor(), FloorId::Level(3));
        assert_eq!(report.status_line(), "Ready. Loaded floors: 1, test_area.");
    }

    #[test]
    fn dataset_with_an_empty_id_is_rejected_whole() {
        let mut src = source();
        src.floors.get_mut(&FloorId::Level(2)).unwrap().push(Location::new(
            "",
            "Nameless",
            FloorId::Level(2),
            Point3::origin(),
            LocationKind::Room,
        ));
        let mut building = Building::new();
        let err = building.load_floor(FloorId::Level(2), &src).unwrap_err();
        assert!(matches!(err, DataLoadError::Invalid { floor: FloorId::Level(2), .. }));
        assert!(building.locations().is_empty());
        assert!(building.sources_on(FloorId::Level(2)).is_empty());
    }

    #[test]
    fn empty_building_reports_no_map_data() {
        assert_eq!(
            LoadReport::default().status_line(),
            "Ready, but no map data loaded."
        );
    }

    #[test]
    fn selection_groups_follow_floor_order() {
        let src = source();
        let mut building = Building::new();
        building.load_floors([FloorId::TestArea, FloorId::Level(2), FloorId::Level(1)], &src);

        let groups = building.selection_groups();
        let labels: Vec<_> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Floor 1", "Floor 2", "Floor test_area"]);
        assert_eq!(groups[0].entries[1], ("102".to_string(), "Room 102".to_string()));
        assert_eq!(building.sources_on(FloorId::Level(1)).len(), 2);
        assert!(building.sources_on(FloorId::Level(9)).is_empty());
    }
}
