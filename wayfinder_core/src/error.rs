// wayfinder_core/src/error.rs

//! The crate-level error. Every failure here is local and recoverable: the
//! `Display` text is the message shown to the user, and the caller stays
//! interactive afterwards.

use thiserror::Error;

use crate::building::{DataLoadError, StoreError};
use crate::planning::PlanningError;
use crate::scan::ScanError;
use crate::session::SessionError;

#[derive(Debug, Error)]
pub enum NavError {
    #[error(transparent)]
    DataLoad(#[from] DataLoadError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Planning(#[from] PlanningError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Scan(#[from] ScanError),
}

pub type NavResult<T> = Result<T, NavError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_errors_keep_their_user_message() {
        let err: NavError = PlanningError::SameLocation.into();
        assert_eq!(
            err.to_string(),
            "Source and destination cannot be the same."
        );
        let err: NavError = SessionError::NoRoutePlanned.into();
        assert_eq!(err.to_string(), "Please calculate a path first.");
    }
}
