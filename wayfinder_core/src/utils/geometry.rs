// wayfinder_core/src/utils/geometry.rs

//! Planar helpers shared by the planner, tracker and projector.
//!
//! The building frame is `x` right, `y` up, `z` forward. Headings and bearings
//! are compass style: degrees clockwise from `+z`, so a bearing of 90° points
//! along `+x`.

use nalgebra::Point3;
use num_traits::Float;

/// Straight-line distance on the floor plane, ignoring height.
pub fn planar_distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    let dx = b.x - a.x;
    let dz = b.z - a.z;
    (dx * dx + dz * dz).sqrt()
}

/// Compass bearing from `from` to `to`, in degrees, range (-180, 180].
pub fn bearing_degrees(from: &Point3<f64>, to: &Point3<f64>) -> f64 {
    (to.x - from.x).atan2(to.z - from.z).to_degrees()
}

/// Wraps any angle into [0, 360).
pub fn wrap_degrees<T: Float>(degrees: T) -> T {
    let full = T::from(360.0).unwrap_or_else(T::zero);
    let wrapped = degrees % full;
    let wrapped = if wrapped < T::zero() {
        wrapped + full
    } else {
        wrapped
    };
    // -1e-20 % 360 + 360 rounds to exactly 360.
    if wrapped >= full {
        T::zero()
    } else {
        wrapped
    }
}

/// Normalizes an angle into (-180, 180].
pub fn normalize_signed_degrees<T: Float>(degrees: T) -> T {
    let half = T::from(180.0).unwrap_or_else(T::zero);
    let full = half + half;
    let wrapped = wrap_degrees(degrees);
    if wrapped > half {
        wrapped - full
    } else {
        wrapped
    }
}

/// Bearing to a target relative to the current heading, in (-180, 180].
/// Positive means the target is to the right.
pub fn relative_angle(bearing_deg: f64, heading_deg: f64) -> f64 {
    normalize_signed_degrees(bearing_deg - heading_deg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn wraps_into_positive_range() {
        assert_abs_diff_eq!(wrap_degrees(0.0_f64), 0.0);
        assert_abs_diff_eq!(wrap_degrees(360.0_f64), 0.0);
        assert_abs_diff_eq!(wrap_degrees(-15.0_f64), 345.0);
        assert_abs_diff_eq!(wrap_degrees(725.0_f64), 5.0);
        assert_abs_diff_eq!(wrap_degrees(-15.0_f32), 345.0_f32);
    }

    #[test]
    fn signed_range_is_half_open_at_minus_180() {
        assert_abs_diff_eq!(normalize_signed_degrees(180.0_f64), 180.0);
        assert_abs_diff_eq!(normalize_signed_degrees(-180.0_f64), 180.0);
        assert_abs_diff_eq!(normalize_signed_degrees(190.0_f64), -170.0);
        assert_abs_diff_eq!(normalize_signed_degrees(-90.0_f64), -90.0);
    }

    #[test]
    fn bearing_is_clockwise_from_forward_axis() {
        let origin = Point3::origin();
        assert_abs_diff_eq!(bearing_degrees(&origin, &Point3::new(0.0, 0.0, 5.0)), 0.0);
        assert_abs_diff_eq!(bearing_degrees(&origin, &Point3::new(5.0, 0.0, 0.0)), 90.0);
        assert_abs_diff_eq!(
            bearing_degrees(&origin, &Point3::new(-5.0, 0.0, 0.0)),
            -90.0
        );
    }

    #[test]
    fn relative_angle_wraps_through_north() {
        assert_abs_diff_eq!(relative_angle(10.0, 350.0), 20.0);
        assert_abs_diff_eq!(relative_angle(350.0, 10.0), -20.0);
        assert_abs_diff_eq!(relative_angle(0.0, 180.0), 180.0);
    }

    #[test]
    fn planar_distance_ignores_height() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(3.0, 40.0, 4.0);
        assert_abs_diff_eq!(planar_distance(&a, &b), 5.0);
    }
}
