// wayfinder_core/src/session/collaborators.rs

//! Narrow contracts for the platform services a session depends on.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacingMode {
    #[default]
    Environment,
    User,
}

/// What the session asks the camera for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraRequest {
    pub facing: FacingMode,
    pub ideal_width: u32,
    pub ideal_height: u32,
}

impl Default for CameraRequest {
    fn default() -> Self {
        Self {
            facing: FacingMode::Environment,
            ideal_width: 1280,
            ideal_height: 720,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CameraError {
    #[error("camera permission denied")]
    PermissionDenied,
    #[error("camera unavailable: {0}")]
    Unavailable(String),
}

/// A live video stream. Stopping it releases the device.
pub trait CameraStream {
    /// Actual frame size, which may differ from the request.
    fn resolution(&self) -> (u32, u32);
    fn stop(&mut self);
    fn is_live(&self) -> bool;
}

pub trait CameraProvider {
    fn open(&mut self, request: &CameraRequest) -> Result<Box<dyn CameraStream>, CameraError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    Camera,
    Orientation,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Permission::Camera => f.write_str("Camera"),
            Permission::Orientation => f.write_str("Orientation"),
        }
    }
}

/// Answer to a permission request. Platforms that never ask report
/// `NotRequired`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionState {
    Granted,
    Denied,
    NotRequired,
}

impl PermissionState {
    pub fn allows(&self) -> bool {
        !matches!(self, PermissionState::Denied)
    }
}

pub trait PermissionProvider {
    fn request(&mut self, permission: Permission) -> PermissionState;
}
