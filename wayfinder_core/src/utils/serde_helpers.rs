// wayfinder_core/src/utils/serde_helpers.rs

/// Reads and writes a `Point3<f64>` as the `{x, y, z}` object used by the
/// floor dataset files. A missing `y` reads as 0.
pub mod point3_from_xyz {
    use nalgebra::Point3;
    use serde::{self, Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Xyz {
        x: f64,
        #[serde(default)]
        y: f64,
        z: f64,
    }

    pub fn serialize<S>(point: &Point3<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Xyz {
            x: point.x,
            y: point.y,
            z: point.z,
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Point3<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let xyz = Xyz::deserialize(deserializer)?;
        Ok(Point3::new(xyz.x, xyz.y, xyz.z))
    }
}
