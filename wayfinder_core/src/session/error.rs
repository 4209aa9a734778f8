// wayfinder_core/src/session/error.rs

use thiserror::Error;

use super::collaborators::Permission;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    #[error("Please calculate a path first.")]
    NoRoutePlanned,
    #[error("Navigation is already running. Exit it before starting again.")]
    AlreadyActive,
    /// Carries the collaborator's reason for the log.
    #[error("Camera permission denied or not available.")]
    CameraUnavailable(String),
    #[error("{0} permission denied or not available.")]
    PermissionDenied(Permission),
    #[error("Navigation is not running.")]
    NotActive,
}
