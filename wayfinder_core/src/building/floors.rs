// wayfinder_core/src/building/floors.rs

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::types::{FloorId, Location};

// =========================================================================
// == Errors ==
// =========================================================================

/// A floor could not be loaded. The floor is left out of selection; every
/// other floor stays usable.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("Could not load data for floor {floor}: {} is missing or unreadable ({source})", .path.display())]
    Io {
        floor: FloorId,
        path: PathBuf,
        source: io::Error,
    },
    #[error("Could not load data for floor {floor}: {} is malformed ({source})", .path.display())]
    Malformed {
        floor: FloorId,
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Could not load data for floor {floor}: {reason}")]
    Invalid { floor: FloorId, reason: String },
}

impl DataLoadError {
    pub fn floor(&self) -> FloorId {
        match self {
            DataLoadError::Io { floor, .. }
            | DataLoadError::Malformed { floor, .. }
            | DataLoadError::Invalid { floor, .. } => *floor,
        }
    }
}

// =========================================================================
// == Datasets ==
// =========================================================================

/// Floor geometry as shipped with the dataset. The planner does not read it;
/// it is kept so a mesh-aware planner can use it later.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NavMesh(pub serde_json::Value);

impl NavMesh {
    /// Number of entries in a top-level `vertices` array, 0 if there is none.
    pub fn vertex_count(&self) -> usize {
        self.0
            .get("vertices")
            .and_then(|v| v.as_array())
            .map_or(0, |v| v.len())
    }
}

/// Everything loaded for one floor. Never mutated after load.
#[derive(Debug, Clone)]
pub struct FloorDataset {
    pub floor: FloorId,
    pub locations: Vec<Location>,
    pub nav_mesh: NavMesh,
}

/// Where floor datasets come from.
pub trait FloorSource: Send + Sync {
    fn fetch(&self, floor: FloorId) -> Result<FloorDataset, DataLoadError>;
}

/// Reads `<root>/<floor folder>/navmesh.json` and `locations.json`.
#[derive(Debug, Clone)]
pub struct DirectoryFloorSource {
    root: PathBuf,
}

impl DirectoryFloorSource {
    pub const NAV_MESH_FILE: &'static str = "navmesh.json";
    pub const LOCATIONS_FILE: &'static str = "locations.json";

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn floor_dir(&self, floor: FloorId) -> PathBuf {
        self.root.join(floor.folder_name())
    }

    fn read_json<T: serde::de::DeserializeOwned>(
        floor: FloorId,
        path: PathBuf,
    ) -> Result<T, DataLoadError> {
        let text = fs::read_to_string(&path).map_err(|source| DataLoadError::Io {
            floor,
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| DataLoadError::Malformed {
            floor,
            path,
            source,
        })
    }
}

impl FloorSource for DirectoryFloorSource {
    fn fetch(&self, floor: FloorId) -> Result<FloorDataset, DataLoadError> {
        let dir = self.floor_dir(floor);
        debug!("Fetching data for floor {} from {:?}", floor, dir);

        let nav_mesh: NavMesh = Self::read_json(floor, dir.join(Self::NAV_MESH_FILE))?;
        let locations: Vec<Location> = Self::read_json(floor, dir.join(Self::LOCATIONS_FILE))?;

        Ok(FloorDataset {
            floor,
            locations,
            nav_mesh,
        })
    }
}

// =========================================================================
// == Arena ==
// =========================================================================

/// Loaded floors keyed by id. A floor is inserted once and never replaced,
/// so a loaded floor is never fetched again.
#[derive(Debug, Default, Clone)]
pub struct FloorArena {
    floors: BTreeMap<FloorId, FloorDataset>,
}

impl FloorArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, floor: FloorId) -> Option<&FloorDataset> {
        self.floors.get(&floor)
    }

    pub fn contains(&self, floor: FloorId) -> bool {
        self.floors.contains_key(&floor)
    }

    /// Inserts a dataset unless its floor is already present. Returns the
    /// dataset held by the arena, which is the earlier one on a repeat.
    pub fn insert(&mut self, dataset: FloorDataset) -> &FloorDataset {
        let floor = dataset.floor;
        self.floors.entry(floor).or_insert_with(|| {
            info!(
                "Floor {} loaded: {} locations, {} navmesh vertices",
                floor,
                dataset.locations.len(),
                dataset.nav_mesh.vertex_count()
            );
            dataset
        })
    }

    /// Loaded floors in `FloorId` order (test area last).
    pub fn floors(&self) -> impl Iterator<Item = FloorId> + '_ {
        self.floors.keys().copied()
    }

    pub fn datasets(&self) -> impl Iterator<Item = &FloorDataset> {
        self.floors.values()
    }

    pub fn len(&self) -> usize {
        self.floors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }
}
