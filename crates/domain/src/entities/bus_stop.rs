//! Bus stop entity

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::value_objects::{Coordinate, RouteId};

/// A fixed bus-route waypoint supplied by the stops provider
///
/// Read-only from the pipeline's perspective: the pipeline selects among
/// stops but never mutates one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusStop {
    /// Provider-assigned stop identifier
    pub id: String,
    /// Human-readable stop name
    pub name: String,
    /// Stop position
    pub location: Coordinate,
    /// Routes known to service this stop
    pub routes: HashSet<RouteId>,
}

impl BusStop {
    /// Create a new stop
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        location: Coordinate,
        routes: HashSet<RouteId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
            routes,
        }
    }

    /// Whether this stop services the given route
    #[must_use]
    pub fn services_route(&self, route: &RouteId) -> bool {
        self.routes.contains(route)
    }
}
