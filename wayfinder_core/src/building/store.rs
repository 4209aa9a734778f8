// wayfinder_core/src/building/store.rs

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;
use tracing::warn;

use crate::types::{FloorId, Location};

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("A location id cannot be empty.")]
    EmptyId,
}

/// Every known location across all loaded floors, keyed by id.
///
/// Ids are global. Registering an id that already exists replaces the old
/// record (last load wins) and the replaced record is handed back so the
/// caller can report the collision.
#[derive(Debug, Default, Clone)]
pub struct LocationStore {
    by_id: HashMap<String, Location>,
    /// Per-floor ids in registration order.
    floor_order: BTreeMap<FloorId, Vec<String>>,
}

impl LocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites a location by id.
    pub fn register(&mut self, location: Location) -> Result<Option<Location>, StoreError> {
        if location.id.is_empty() {
            return Err(StoreError::EmptyId);
        }

        let previous = self.by_id.remove(&location.id);
        if let Some(old) = &previous {
            warn!(
                "Location id '{}' registered again: '{}' on floor {} replaces '{}' on floor {}",
                location.id, location.name, location.floor, old.name, old.floor
            );
            if old.floor != location.floor {
                if let Some(ids) = self.floor_order.get_mut(&old.floor) {
                    ids.retain(|id| id != &location.id);
                }
            }
        }

        let ids = self.floor_order.entry(location.floor).or_default();
        if !ids.iter().any(|id| id == &location.id) {
            ids.push(location.id.clone());
        }
        self.by_id.insert(location.id.clone(), location);
        Ok(previous)
    }

    pub fn get(&self, id: &str) -> Option<&Location> {
        self.by_id.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Locations on one floor, in registration order.
    pub fn by_floor(&self, floor: FloorId) -> Vec<&Location> {
        self.floor_order
            .get(&floor)
            .map(|ids| ids.iter().filter_map(|id| self.by_id.get(id)).collect())
            .unwrap_or_default()
    }

    /// Floors that currently hold at least one location, in `FloorId` order.
    pub fn floors(&self) -> impl Iterator<Item = FloorId> + '_ {
        self.floor_order
            .iter()
            .filter(|(_, ids)| !ids.is_empty())
            .map(|(floor, _)| *floor)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LocationKind;
    use nalgebra::Point3;

    fn room(id: &str, floor: FloorId) -> Location {
        Location::new(id, id.to_uppercase(), floor, Point3::origin(), LocationKind::Room)
    }

    #[test]
    fn rejects_empty_ids() {
        let mut store = LocationStore::new();
        assert_eq!(
            store.register(room("", FloorId::Level(1))),
            Err(StoreError::EmptyId)
        );
        assert!(store.is_empty());
    }

    #[test]
    fn by_floor_keeps_registration_order() {
        let mut store = LocationStore::new();
        for id in ["c", "a", "b"] {
            store.register(room(id, FloorId::Level(1))).unwrap();
        }
        store.register(room("z", FloorId::Level(2))).unwrap();

        let ids: Vec<_> = store
            .by_floor(FloorId::Level(1))
            .iter()
            .map(|l| l.id.as_str())
            .collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        assert!(store.by_floor(FloorId::TestArea).is_empty());
    }

    #[test]
    fn duplicate_id_is_last_load_wins_and_moves_floor() {
        let mut store = LocationStore::new();
        store.register(room("lobby", FloorId::Level(1))).unwrap();
        let replaced = store.register(room("lobby", FloorId::Level(2))).unwrap();

        assert_eq!(replaced.map(|l| l.floor), Some(FloorId::Level(1)));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("lobby").map(|l| l.floor), Some(FloorId::Level(2)));
        assert!(store.by_floor(FloorId::Level(1)).is_empty());
        assert_eq!(store.by_floor(FloorId::Level(2)).len(), 1);
        assert_eq!(store.floors().collect::<Vec<_>>(), vec![FloorId::Level(2)]);
    }
}
