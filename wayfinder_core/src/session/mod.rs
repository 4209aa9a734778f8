// wayfinder_core/src/session/mod.rs

//! The navigation session and the collaborator contracts it drives.
//!
//! Sensor callbacks push samples into a [`SensorSubscription`]; the owner of
//! the session calls [`NavigationSession::tick`] once per rendered frame,
//! which applies the queued samples in order and returns the overlay frame.

mod collaborators;
mod config;
mod error;
mod navigation;

pub use collaborators::{
    CameraError, CameraProvider, CameraRequest, CameraStream, FacingMode, Permission,
    PermissionProvider, PermissionState,
};
pub use config::{SessionConfig, TestModeConfig};
pub use error::SessionError;
pub use navigation::{
    NavigationSession, OrientationAccess, PlannedTrip, SensorEvent, SensorPushError,
    SensorSubscription, SessionPhase, SessionStatus, TestWalk,
};
