// wayfinder_core/src/planning/route.rs

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use super::error::PlanningError;
use crate::types::Waypoint;
use crate::utils::geometry::planar_distance;

/// An ordered polyline from the trip's source toward its target.
///
/// Always holds at least two waypoints; the only constructor is the planner.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    waypoints: Vec<Waypoint>,
}

impl Route {
    pub(crate) fn from_waypoints(waypoints: Vec<Waypoint>) -> Option<Self> {
        (waypoints.len() >= 2).then_some(Self { waypoints })
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Never true; kept for the `len`/`is_empty` pair.
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn first(&self) -> &Waypoint {
        &self.waypoints[0]
    }

    pub fn last(&self) -> &Waypoint {
        &self.waypoints[self.waypoints.len() - 1]
    }

    /// Cumulative 3D segment length in meters.
    pub fn length(&self) -> f64 {
        self.waypoints
            .windows(2)
            .map(|pair| nalgebra::distance(&pair[0], &pair[1]))
            .sum()
    }

    /// Index of the waypoint closest to `pos` on the floor plane. Ties go to
    /// the earliest waypoint.
    pub fn nearest_index(&self, pos: &Point3<f64>) -> usize {
        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        for (i, wp) in self.waypoints.iter().enumerate() {
            let d = planar_distance(pos, wp);
            if d < best_distance {
                best_distance = d;
                best = i;
            }
        }
        best
    }
}

/// Tunables for route generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Target spacing between interpolated waypoints, meters.
    pub waypoint_interval: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            waypoint_interval: 5.0,
        }
    }
}

impl PlannerConfig {
    /// Upper bound on segments in one route.
    pub const MAX_SEGMENTS: usize = 10_000;

    pub fn validate(&self) -> Result<(), PlanningError> {
        if self.waypoint_interval.is_finite() && self.waypoint_interval > 0.0 {
            Ok(())
        } else {
            Err(PlanningError::InvalidInterval(self.waypoint_interval))
        }
    }
}

/// Straight interpolated line from `source` to `dest`.
///
/// Uses `n = max(2, ceil(d / interval))` segments, where `d` is the planar
/// distance, so the route holds `n + 1` points. All three coordinates are
/// interpolated. The floor's nav mesh is not consulted.
///
/// Fails on an invalid interval, and when `n` would exceed
/// [`PlannerConfig::MAX_SEGMENTS`] or the distance is not finite.
pub fn plan_same_floor(
    source: &Point3<f64>,
    dest: &Point3<f64>,
    config: &PlannerConfig,
) -> Result<Route, PlanningError> {
    config.validate()?;
    let distance = planar_distance(source, dest);
    let segments = (distance / config.waypoint_interval).ceil();
    if !segments.is_finite() || segments > PlannerConfig::MAX_SEGMENTS as f64 {
        return Err(PlanningError::RouteTooLong { distance });
    }
    let segments = (segments as usize).max(2);

    let waypoints = (0..=segments)
        .map(|i| {
            let t = i as f64 / segments as f64;
            source + (dest - source) * t
        })
        .collect();

    Ok(Route { waypoints })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn same_floor_route_starts_and_ends_on_the_endpoints() {
        let config = PlannerConfig::default();
        let pairs = [
            (Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 0.0, 0.0)),
            (Point3::new(-3.0, 1.0, 2.0), Point3::new(20.0, 1.0, -14.5)),
            (Point3::new(1.0, 0.0, 1.0), Point3::new(1.5, 0.0, 1.0)),
        ];
        for (a, b) in pairs {
            let route = plan_same_floor(&a, &b, &config).unwrap();
            let expected = ((planar_distance(&a, &b) / 5.0).ceil() as usize).max(2) + 1;
            assert_eq!(route.len(), expected);
            assert_abs_diff_eq!(*route.first(), a, epsilon = 1e-12);
            assert_abs_diff_eq!(*route.last(), b, epsilon = 1e-12);
        }
    }

    #[test]
    fn straight_route_length_matches_the_direct_distance() {
        let a = Point3::new(2.0, 0.0, -7.0);
        let b = Point3::new(31.0, 0.0, 12.0);
        let route = plan_same_floor(&a, &b, &PlannerConfig::default()).unwrap();
        assert_abs_diff_eq!(route.length(), nalgebra::distance(&a, &b), epsilon = 1e-9);
    }

    #[test]
    fn height_is_interpolated_when_present() {
        let route = plan_same_floor(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(0.0, 4.0, 10.0),
            &PlannerConfig::default(),
        )
        .unwrap();
        assert_eq!(route.len(), 3);
        assert_abs_diff_eq!(route.waypoints()[1].y, 2.0);
        assert_abs_diff_eq!(route.waypoints()[1].z, 5.0);
    }

    #[test]
    fn nearest_index_prefers_the_first_of_equal_candidates() {
        let route = Route::from_waypoints(vec![
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(5.0, 0.0, 0.0),
        ])
        .unwrap();
        assert_eq!(route.nearest_index(&Point3::origin()), 0);
        assert_eq!(route.nearest_index(&Point3::new(4.0, 0.0, 0.0)), 2);
    }

    #[test]
    fn rejects_intervals_that_are_not_positive_and_finite() {
        let (a, b) = (Point3::origin(), Point3::new(10.0, 0.0, 0.0));
        for interval in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let config = PlannerConfig {
                waypoint_interval: interval,
            };
            assert!(matches!(
                plan_same_floor(&a, &b, &config),
                Err(PlanningError::InvalidInterval(_))
            ));
        }
    }

    #[test]
    fn caps_the_segment_count() {
        let config = PlannerConfig::default();
        let far = Point3::new(1.0e12, 0.0, 0.0);
        assert!(matches!(
            plan_same_floor(&Point3::origin(), &far, &config),
            Err(PlanningError::RouteTooLong { .. })
        ));
        let nan = Point3::new(f64::NAN, 0.0, 0.0);
        assert!(plan_same_floor(&Point3::origin(), &nan, &config).is_err());

        // Exactly at the cap is still planned.
        let edge = Point3::new(5.0 * PlannerConfig::MAX_SEGMENTS as f64, 0.0, 0.0);
        let route = plan_same_floor(&Point3::origin(), &edge, &config).unwrap();
        assert_eq!(route.len(), PlannerConfig::MAX_SEGMENTS + 1);
    }

    #[test]
    fn route_needs_two_points() {
        assert!(Route::from_waypoints(vec![Point3::origin()]).is_none());
    }
}
