// wayfinder_core/src/prelude.rs

// --- Core Data Structures (The "nouns" of the library) ---
pub use crate::types::{FloorId, Location, LocationKind, Waypoint};

// --- Errors ---
pub use crate::error::{NavError, NavResult};

// --- Building data ---
pub use crate::building::{
    Building, DirectoryFloorSource, FloorArena, FloorDataset, FloorGroup, FloorSource, LoadReport,
    LocationStore, NavMesh,
};
pub use crate::scan::{resolve_scan, ScanSelection};

// --- Algorithms ---
pub use crate::planning::{PlanResult, Route, RoutePlanner, RoutePreview};
pub use crate::projection::{ArFrame, ArProjector, ScreenPoint};
pub use crate::sensing::{AccelSample, HeadingState, OrientationSample, StepDetector, StepEvent};
pub use crate::tracking::DeadReckoningTracker;

// --- Session & collaborators ---
pub use crate::session::{
    CameraError, CameraProvider, CameraRequest, CameraStream, NavigationSession,
    OrientationAccess, Permission, PermissionProvider, PermissionState, SensorEvent,
    SensorSubscription, SessionConfig, SessionError, SessionPhase, SessionStatus,
};
