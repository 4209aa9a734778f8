// wayfinder_core/src/scan.rs

//! Source selection from a decoded QR payload. Decoding the image is left to
//! the caller; only the text is resolved here.

use thiserror::Error;
use tracing::{info, warn};

use crate::building::LocationStore;
use crate::types::{FloorId, Location};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScanError {
    #[error("Scanned invalid QR code: {0}")]
    UnknownLocation(String),
}

/// A scanned location, ready to become the selected source.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanSelection<'a> {
    pub location: &'a Location,
}

impl ScanSelection<'_> {
    /// The floor the selection surface should switch to.
    pub fn floor(&self) -> FloorId {
        self.location.floor
    }

    pub fn message(&self) -> String {
        format!("Source set to: {}", self.location.name)
    }
}

/// Resolves a decoded payload, ignoring surrounding whitespace.
pub fn resolve_scan<'a>(payload: &str, store: &'a LocationStore) -> Result<ScanSelection<'a>, ScanError> {
    let id = payload.trim();
    match store.get(id) {
        Some(location) => {
            info!("QR scan resolved to '{}' on floor {}", location.name, location.floor);
            Ok(ScanSelection { location })
        }
        None => {
            warn!("QR scan with unknown payload '{}'", id);
            Err(ScanError::UnknownLocation(id.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LocationKind;
    use nalgebra::Point3;

    fn store() -> LocationStore {
        let mut store = LocationStore::new();
        store
            .register(Location::new(
                "lab-2",
                "Robotics Lab",
                FloorId::Level(2),
                Point3::origin(),
                LocationKind::Room,
            ))
            .unwrap();
        store
    }

    #[test]
    fn trims_payload_before_lookup() {
        let store = store();
        let selection = resolve_scan("  lab-2\n", &store).unwrap();
        assert_eq!(selection.floor(), FloorId::Level(2));
        assert_eq!(selection.message(), "Source set to: Robotics Lab");
    }

    #[test]
    fn unknown_payload_is_reported() {
        let err = resolve_scan(" nowhere ", &store()).unwrap_err();
        assert_eq!(err.to_string(), "Scanned invalid QR code: nowhere");
    }
}
