// wayfinder_core/src/planning/planner.rs

use tracing::{debug, info};

use super::error::PlanningError;
use super::route::{plan_same_floor, PlannerConfig, Route};
use crate::building::LocationStore;
use crate::types::{FloorId, Location};

/// Outcome of a successful `plan_path`.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanResult {
    SameFloor {
        source: Location,
        destination: Location,
        route: Route,
    },
    /// The route stops at `connector`; the far floor leg is only described.
    CrossFloor {
        source: Location,
        destination: Location,
        connector: Location,
        route: Route,
    },
}

impl PlanResult {
    pub fn route(&self) -> &Route {
        match self {
            PlanResult::SameFloor { route, .. } | PlanResult::CrossFloor { route, .. } => route,
        }
    }

    pub fn source(&self) -> &Location {
        match self {
            PlanResult::SameFloor { source, .. } | PlanResult::CrossFloor { source, .. } => source,
        }
    }

    pub fn destination(&self) -> &Location {
        match self {
            PlanResult::SameFloor { destination, .. }
            | PlanResult::CrossFloor { destination, .. } => destination,
        }
    }

    pub fn connector(&self) -> Option<&Location> {
        match self {
            PlanResult::SameFloor { .. } => None,
            PlanResult::CrossFloor { connector, .. } => Some(connector),
        }
    }

    pub fn is_cross_floor(&self) -> bool {
        matches!(self, PlanResult::CrossFloor { .. })
    }

    pub fn into_route(self) -> Route {
        match self {
            PlanResult::SameFloor { route, .. } | PlanResult::CrossFloor { route, .. } => route,
        }
    }
}

/// Plans trips between named locations of a [`LocationStore`].
#[derive(Debug, Clone)]
pub struct RoutePlanner<'a> {
    store: &'a LocationStore,
    config: PlannerConfig,
}

impl<'a> RoutePlanner<'a> {
    pub fn new(store: &'a LocationStore, config: PlannerConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Straight route between two positions on one floor.
    pub fn plan_same_floor(
        &self,
        source: &Location,
        dest: &Location,
    ) -> Result<Route, PlanningError> {
        plan_same_floor(&source.pos, &dest.pos, &self.config)
    }

    /// Route from `source` to the best connector on its own floor.
    ///
    /// The connector whose route has the fewest waypoints wins; on a tie the
    /// earliest registered connector is kept.
    pub fn plan_cross_floor(
        &self,
        source: &Location,
        dest: &Location,
    ) -> Result<(Route, Location), PlanningError> {
        self.config.validate()?;
        let mut best: Option<(Route, &Location)> = None;

        for connector in self
            .store
            .by_floor(source.floor)
            .into_iter()
            .filter(|l| l.is_connector())
        {
            let route = match self.plan_same_floor(source, connector) {
                Ok(route) => route,
                Err(e) => {
                    debug!("Skipping connector '{}': {}", connector.id, e);
                    continue;
                }
            };
            let better = best
                .as_ref()
                .map_or(true, |(current, _)| route.len() < current.len());
            if better {
                best = Some((route, connector));
            }
        }

        let (route, connector) = best.ok_or(PlanningError::NoConnectorReachable {
            floor: source.floor,
        })?;
        info!(
            "Cross-floor trip {} -> {}: using connector '{}' ({} waypoints), then floor {}",
            source.id,
            dest.id,
            connector.name,
            route.len(),
            dest.floor
        );
        Ok((route, connector.clone()))
    }

    /// Validates both ids and plans on one floor or via a connector.
    pub fn plan_path(&self, source_id: &str, dest_id: &str) -> Result<PlanResult, PlanningError> {
        if source_id == dest_id {
            return Err(PlanningError::SameLocation);
        }
        let source = self.lookup(source_id)?;
        let destination = self.lookup(dest_id)?;

        if source.floor == destination.floor {
            let route = self.plan_same_floor(source, destination)?;
            debug!(
                "Same-floor trip {} -> {}: {} waypoints, {:.1} m",
                source.id,
                destination.id,
                route.len(),
                route.length()
            );
            Ok(PlanResult::SameFloor {
                source: source.clone(),
                destination: destination.clone(),
                route,
            })
        } else {
            let (route, connector) = self.plan_cross_floor(source, destination)?;
            Ok(PlanResult::CrossFloor {
                source: source.clone(),
                destination: destination.clone(),
                connector,
                route,
            })
        }
    }

    /// Connectors available on `floor`, in registration order.
    pub fn connectors_on(&self, floor: FloorId) -> Vec<&'a Location> {
        self.store
            .by_floor(floor)
            .into_iter()
            .filter(|l| l.is_connector())
            .collect()
    }

    fn lookup(&self, id: &str) -> Result<&'a Location, PlanningError> {
        self.store
            .get(id)
            .ok_or_else(|| PlanningError::LocationNotFound(id.to_string()))
    }
}
