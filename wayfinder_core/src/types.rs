// wayfinder_core/src/types.rs

use nalgebra::Point3;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::utils::serde_helpers;

// --- Core Type Aliases ---

/// A point on a planned route, in meters, building-local frame.
/// Not necessarily the position of a named location.
pub type Waypoint = Point3<f64>;

// =========================================================================
// == Floor Identifier ==
// =========================================================================

/// Identifies one floor dataset.
///
/// Ordering is numeric ascending with the standalone test area always last,
/// which is the order floors are offered for selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FloorId {
    /// A real building level, numbered from 1.
    Level(u32),
    /// The standalone test area.
    TestArea,
}

#[derive(Debug, Error, PartialEq)]
#[error("'{0}' is not a valid floor id")]
pub struct InvalidFloorId(pub String);

impl FloorId {
    pub const TEST_AREA_KEY: &'static str = "test_area";

    /// Builds a level id, rejecting the non-positive level 0.
    pub fn level(number: u32) -> Result<Self, InvalidFloorId> {
        if number == 0 {
            return Err(InvalidFloorId(number.to_string()));
        }
        Ok(FloorId::Level(number))
    }

    /// Name of the directory the floor's data files live in.
    pub fn folder_name(&self) -> String {
        match self {
            FloorId::Level(n) => format!("floor_{}", n),
            FloorId::TestArea => Self::TEST_AREA_KEY.to_string(),
        }
    }

    /// Human-facing label, e.g. "Floor 2".
    pub fn label(&self) -> String {
        format!("Floor {}", self)
    }

    pub fn is_test_area(&self) -> bool {
        matches!(self, FloorId::TestArea)
    }
}

impl fmt::Display for FloorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FloorId::Level(n) => write!(f, "{}", n),
            FloorId::TestArea => f.write_str(Self::TEST_AREA_KEY),
        }
    }
}

impl FromStr for FloorId {
    type Err = InvalidFloorId;

    /// Accepts `"2"`, `"floor_2"` and `"test_area"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed == Self::TEST_AREA_KEY {
            return Ok(FloorId::TestArea);
        }
        let digits = trimmed.strip_prefix("floor_").unwrap_or(trimmed);
        digits
            .parse::<u32>()
            .map_err(|_| InvalidFloorId(s.to_string()))
            .and_then(FloorId::level)
    }
}

impl Serialize for FloorId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FloorId::Level(n) => serializer.serialize_u32(*n),
            FloorId::TestArea => serializer.serialize_str(Self::TEST_AREA_KEY),
        }
    }
}

struct FloorIdVisitor;

impl<'de> Visitor<'de> for FloorIdVisitor {
    type Value = FloorId;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a positive floor number or \"test_area\"")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<FloorId, E> {
        let number = u32::try_from(v).map_err(|_| E::custom(InvalidFloorId(v.to_string())))?;
        FloorId::level(number).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<FloorId, E> {
        let number = u64::try_from(v).map_err(|_| E::custom(InvalidFloorId(v.to_string())))?;
        self.visit_u64(number)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<FloorId, E> {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for FloorId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(FloorIdVisitor)
    }
}

// =========================================================================
// == Locations ==
// =========================================================================

/// What a location is used for. Connectors (stairs, elevators) are the only
/// places a trip can cross between floors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LocationKind {
    #[default]
    Room,
    Connector,
}

impl From<String> for LocationKind {
    fn from(value: String) -> Self {
        if value.eq_ignore_ascii_case("connector") {
            LocationKind::Connector
        } else {
            LocationKind::Room
        }
    }
}

impl From<LocationKind> for String {
    fn from(kind: LocationKind) -> Self {
        match kind {
            LocationKind::Room => "room".to_string(),
            LocationKind::Connector => "connector".to_string(),
        }
    }
}

/// A named place in the building. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub floor: FloorId,
    /// Meters, building-local frame. `y` is up and defaults to 0 when absent.
    #[serde(with = "serde_helpers::point3_from_xyz")]
    pub pos: Point3<f64>,
    #[serde(rename = "type", default)]
    pub kind: LocationKind,
}

impl Location {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        floor: FloorId,
        pos: Point3<f64>,
        kind: LocationKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            floor,
            pos,
            kind,
        }
    }

    pub fn is_connector(&self) -> bool {
        matches!(self.kind, LocationKind::Connector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_ids_sort_numerically_with_test_area_last() {
        let mut floors = vec![
            FloorId::TestArea,
            FloorId::Level(10),
            FloorId::Level(2),
            FloorId::Level(1),
        ];
        floors.sort();
        assert_eq!(
            floors,
            vec![
                FloorId::Level(1),
                FloorId::Level(2),
                FloorId::Level(10),
                FloorId::TestArea
            ]
        );
    }

    #[test]
    fn floor_id_parses_all_spellings() {
        assert_eq!("3".parse::<FloorId>(), Ok(FloorId::Level(3)));
        assert_eq!("floor_7".parse::<FloorId>(), Ok(FloorId::Level(7)));
        assert_eq!("test_area".parse::<FloorId>(), Ok(FloorId::TestArea));
        assert!("0".parse::<FloorId>().is_err());
        assert!("basement".parse::<FloorId>().is_err());
    }

    #[test]
    fn location_deserializes_from_dataset_record() {
        let json = r#"{"id":"stairs-a","name":"Stairs A","floor":1,
                       "pos":{"x":4.5,"z":-2.0},"type":"connector"}"#;
        let loc: Location = serde_json::from_str(json).unwrap();
        assert_eq!(loc.floor, FloorId::Level(1));
        assert_eq!(loc.pos, Point3::new(4.5, 0.0, -2.0));
        assert!(loc.is_connector());

        let json = r#"{"id":"lab","name":"Lab","floor":"test_area",
                       "pos":{"x":0,"y":1,"z":0},"type":"office"}"#;
        let loc: Location = serde_json::from_str(json).unwrap();
        assert_eq!(loc.floor, FloorId::TestArea);
        assert_eq!(loc.kind, LocationKind::Room);
    }

    #[test]
    fn floor_labels_and_folders() {
        assert_eq!(FloorId::Level(2).folder_name(), "floor_2");
        assert_eq!(FloorId::TestArea.folder_name(), "test_area");
        assert_eq!(FloorId::Level(2).label(), "Floor 2");
    }
}
