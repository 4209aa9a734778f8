// wayfinder_core/src/planning/mod.rs

//! Route planning over named locations.
//!
//! Routes are straight interpolated lines. Trips that change floor are routed
//! to a connector on the source floor; the remainder is described in text.

mod error;
mod planner;
mod preview;
mod route;

pub use error::PlanningError;
pub use planner::{PlanResult, RoutePlanner};
pub use preview::RoutePreview;
pub use route::{plan_same_floor, PlannerConfig, Route};
