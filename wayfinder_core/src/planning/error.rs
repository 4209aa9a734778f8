// wayfinder_core/src/planning/error.rs

use thiserror::Error;

use crate::types::FloorId;

/// Planning-time failures. None of them changes session state.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PlanningError {
    #[error("Source and destination cannot be the same.")]
    SameLocation,
    #[error("Location '{0}' was not found.")]
    LocationNotFound(String),
    /// The source floor has no stairs or elevator a route could reach.
    #[error("Could not find a path to stairs or an elevator.")]
    NoConnectorReachable { floor: FloorId },
    #[error("Waypoint interval must be a positive number of meters, got {0}.")]
    InvalidInterval(f64),
    /// The endpoints are too far apart (or not finite) to interpolate.
    #[error("Could not plan a straight route over {distance} m.")]
    RouteTooLong { distance: f64 },
}
