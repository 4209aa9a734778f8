// wayfinder_core/src/projection/ar_projector.rs

//! Pseudo-3D ground projection of the route for the camera overlay.
//!
//! There is no camera model. A point is placed on screen from its planar
//! distance and its bearing relative to the device heading only:
//!
//! ```text
//! perspective = 1 / (1 + falloff * d)
//! r           = pixels_per_meter * d * perspective
//! x           = sin(a) * r * horizontal_gain
//! y           = baseline - cos(a) * r * vertical_gain
//! ```
//!
//! Coordinates are relative to the frame centre, `y` growing downward.

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::planning::Route;
use crate::types::{Location, Waypoint};
use crate::utils::geometry::{bearing_degrees, planar_distance, relative_angle};

// =========================================================================
// == Configuration ==
// =========================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectorConfig {
    /// Points closer than this are not drawn, meters.
    pub min_distance: f64,
    /// Points farther than this are not drawn, meters.
    pub max_distance: f64,
    /// Points with `|relative angle|` above this are behind the view, degrees.
    pub half_fov_deg: f64,
    pub perspective_falloff: f64,
    pub pixels_per_meter: f64,
    pub horizontal_gain: f64,
    pub vertical_gain: f64,
    /// Downward offset of the ground origin from the frame centre, pixels.
    pub baseline_px: f64,
    /// Route waypoints beyond this planar radius are left out of the trail.
    pub trail_radius: f64,
    /// The arrow aims at the first upcoming waypoint beyond this distance.
    pub look_ahead: f64,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            min_distance: 0.5,
            max_distance: 25.0,
            half_fov_deg: 90.0,
            perspective_falloff: 0.05,
            pixels_per_meter: 15.0,
            horizontal_gain: 1.5,
            vertical_gain: 0.8,
            baseline_px: 100.0,
            trail_radius: 20.0,
            look_ahead: 4.0,
        }
    }
}

// =========================================================================
// == Frame Output ==
// =========================================================================

/// A projected point, in pixels from the frame centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
    /// Planar distance of the world point from the viewer, meters.
    pub distance: f64,
}

/// Where the directional arrow points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowCue {
    pub target: Waypoint,
    /// Absolute compass bearing to `target`, degrees in (-180, 180].
    pub target_bearing_deg: f64,
    /// Rotation to apply to the arrow, degrees in (-180, 180].
    pub relative_deg: f64,
    /// True when no waypoint lay beyond the look-ahead distance.
    pub aims_at_destination: bool,
}

/// Inputs for one rendered frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    pub route: &'a Route,
    pub position: Point3<f64>,
    pub heading_deg: f64,
    pub source: &'a Location,
    pub destination: &'a Location,
    /// The distance shown to the user. The tracker's value in live mode.
    pub distance_to_destination: f64,
    pub step_count: u64,
    pub test_mode: bool,
}

/// Everything the overlay needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ArFrame {
    /// Visible trail points, current position first when visible.
    pub trail: Vec<ScreenPoint>,
    /// World points the trail was built from, before culling.
    pub trail_world: Vec<Waypoint>,
    pub nearest_index: usize,
    pub arrow: ArrowCue,
    pub position: Point3<f64>,
    pub heading_deg: f64,
    pub distance_to_destination: f64,
    pub source_name: String,
    pub destination_name: String,
    pub step_count: u64,
    pub test_mode: bool,
}

impl ArFrame {
    /// A trail is only drawn as a polyline when two or more points survive.
    pub fn has_trail(&self) -> bool {
        self.trail.len() > 1
    }

    /// The "Target | Device | Relative" readout, whole degrees.
    pub fn heading_readout(&self) -> String {
        format!(
            "Target: {:.0}° | Device: {:.0}° | Relative: {:.0}°",
            self.arrow.target_bearing_deg, self.heading_deg, self.arrow.relative_deg
        )
    }

    pub fn distance_label(&self) -> String {
        format!("{:.1}m to destination", self.distance_to_destination)
    }
}

// =========================================================================
// == Projector ==
// =========================================================================

#[derive(Debug, Clone, Default)]
pub struct ArProjector {
    config: ProjectorConfig,
}

impl ArProjector {
    pub fn new(config: ProjectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectorConfig {
        &self.config
    }

    /// Projects a world point, or `None` when it is too close, too far or
    /// outside the forward half-plane.
    pub fn project(
        &self,
        world: &Point3<f64>,
        position: &Point3<f64>,
        heading_deg: f64,
    ) -> Option<ScreenPoint> {
        let c = &self.config;
        let distance = planar_distance(position, world);
        if distance < c.min_distance || distance > c.max_distance {
            return None;
        }

        let relative = relative_angle(bearing_degrees(position, world), heading_deg);
        if relative.abs() > c.half_fov_deg {
            return None;
        }

        let angle = relative.to_radians();
        let perspective = 1.0 / (1.0 + c.perspective_falloff * distance);
        let screen_distance = c.pixels_per_meter * distance * perspective;

        Some(ScreenPoint {
            x: angle.sin() * screen_distance * c.horizontal_gain,
            y: c.baseline_px - angle.cos() * screen_distance * c.vertical_gain,
            distance,
        })
    }

    /// The current position followed by every waypoint from the nearest one
    /// onward that lies within the trail radius.
    pub fn select_trail(&self, route: &Route, position: &Point3<f64>) -> Vec<Waypoint> {
        let nearest = route.nearest_index(position);
        std::iter::once(*position)
            .chain(
                route.waypoints()[nearest..]
                    .iter()
                    .filter(|wp| planar_distance(position, wp) <= self.config.trail_radius)
                    .copied(),
            )
            .collect()
    }

    /// First waypoint from the nearest one onward that is farther than the
    /// look-ahead distance, else the destination.
    pub fn arrow_target(
        &self,
        route: &Route,
        position: &Point3<f64>,
        destination: &Point3<f64>,
    ) -> (Waypoint, bool) {
        let nearest = route.nearest_index(position);
        route.waypoints()[nearest..]
            .iter()
            .find(|wp| planar_distance(position, wp) > self.config.look_ahead)
            .map_or((*destination, true), |wp| (*wp, false))
    }

    pub fn arrow(
        &self,
        route: &Route,
        position: &Point3<f64>,
        heading_deg: f64,
        destination: &Point3<f64>,
    ) -> ArrowCue {
        let (target, aims_at_destination) = self.arrow_target(route, position, destination);
        let target_bearing_deg = bearing_degrees(position, &target);
        ArrowCue {
            target,
            target_bearing_deg,
            relative_deg: relative_angle(target_bearing_deg, heading_deg),
            aims_at_destination,
        }
    }

    /// Builds the full overlay frame.
    pub fn frame(&self, ctx: &FrameContext<'_>) -> ArFrame {
        let trail_world = self.select_trail(ctx.route, &ctx.position);
        let trail = trail_world
            .iter()
            .filter_map(|p| self.project(p, &ctx.position, ctx.heading_deg))
            .collect();

        ArFrame {
            trail,
            trail_world,
            nearest_index: ctx.route.nearest_index(&ctx.position),
            arrow: self.arrow(
                ctx.route,
                &ctx.position,
                ctx.heading_deg,
                &ctx.destination.pos,
            ),
            position: ctx.position,
            heading_deg: ctx.heading_deg,
            distance_to_destination: ctx.distance_to_destination,
            source_name: ctx.source.name.clone(),
            destination_name: ctx.destination.name.clone(),
            step_count: ctx.step_count,
            test_mode: ctx.test_mode,
        }
    }

    /// Converts a centre-relative point into canvas pixels.
    pub fn to_canvas(point: &ScreenPoint, width: f64, height: f64) -> (f64, f64) {
        (width / 2.0 + point.x, height / 2.0 + point.y)
    }
}
