// wayfinder_core/src/planning/preview.rs

use std::fmt;

use super::planner::PlanResult;

/// Text shown to the user after a successful plan, before guidance starts.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePreview {
    /// e.g. "Lobby → Stairs A → Floor 2 → Lab".
    pub description: String,
    /// Route length in meters. For a cross-floor trip this is the distance to
    /// the connector.
    pub distance_m: f64,
    pub waypoint_count: usize,
    /// Set for cross-floor trips only.
    pub instructions: Option<String>,
}

impl RoutePreview {
    pub fn from_plan(plan: &PlanResult) -> Self {
        let source = plan.source();
        let dest = plan.destination();
        let route = plan.route();

        match plan.connector() {
            None => Self {
                description: format!("{} → {}", source.name, dest.name),
                distance_m: route.length(),
                waypoint_count: route.len(),
                instructions: None,
            },
            Some(connector) => {
                let floor = dest.floor.label();
                Self {
                    description: format!(
                        "{} → {} → {} → {}",
                        source.name, connector.name, floor, dest.name
                    ),
                    distance_m: route.length(),
                    waypoint_count: route.len(),
                    instructions: Some(format!(
                        "Follow the AR path to {}, then proceed to {} to reach {}.",
                        connector.name, floor, dest.name
                    )),
                }
            }
        }
    }

    /// The distance line, "Distance: 10.0m".
    pub fn distance_line(&self) -> String {
        format!("Distance: {:.1}m", self.distance_m)
    }
}

impl fmt::Display for RoutePreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.description)?;
        match &self.instructions {
            None => write!(
                f,
                "{}, {} waypoints",
                self.distance_line(),
                self.waypoint_count
            ),
            Some(text) => write!(f, "{}. {}", self.distance_line(), text),
        }
    }
}
