//! Offline stand-ins for the external services.

use crate::geocoding::nominatim::{Place, PlaceSearch};
use crate::routing::osrm::{Route, RouteResponse, RouteSource};
use crate::transport::error::TransportError;
use crate::types::lon_lat::LonLat;
use std::collections::{HashMap, HashSet};

pub(crate) fn place(display_name: &str, kind: &str, lon: &str, lat: &str) -> Place {
    Place {
        place_id: None,
        display_name: display_name.to_string(),
        class: Some("amenity".to_string()),
        kind: kind.to_string(),
        lon: lon.to_string(),
        lat: lat.to_string(),
    }
}

fn service_error(code: &str) -> TransportError {
    TransportError::Service {
        url: "http://fake.test".to_string(),
        code: code.to_string(),
        message: "simulated failure".to_string(),
    }
}

/// Answers searches from a fixed table. Unknown queries get an empty candidate list.
#[derive(Debug, Default)]
pub(crate) struct FakePlaceSearch {
    responses: HashMap<String, Vec<Place>>,
    failing: HashSet<String>,
}

impl FakePlaceSearch {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, query: &str, places: Vec<Place>) -> Self {
        self.responses.insert(query.to_string(), places);
        self
    }

    pub(crate) fn failing(mut self, query: &str) -> Self {
        self.failing.insert(query.to_string());
        self
    }
}

impl PlaceSearch for FakePlaceSearch {
    async fn search(&self, query: &str) -> Result<Vec<Place>, TransportError> {
        if self.failing.contains(query) {
            return Err(service_error("Unavailable"));
        }
        Ok(self.responses.get(query).cloned().unwrap_or_default())
    }
}

/// Answers route requests from a fixed table of directed durations.
/// Unknown pairs get OSRM's "NoRoute" answer.
#[derive(Debug, Default)]
pub(crate) struct FakeRouteSource {
    durations: Vec<(LonLat, LonLat, f64)>,
    failing: bool,
}

impl FakeRouteSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, from: LonLat, to: LonLat, duration: f64) -> Self {
        self.durations.push((from, to, duration));
        self
    }

    pub(crate) fn failing(mut self) -> Self {
        self.failing = true;
        self
    }
}

impl RouteSource for FakeRouteSource {
    async fn route(&self, from: LonLat, to: LonLat) -> Result<RouteResponse, TransportError> {
        if self.failing {
            return Err(service_error("TooBig"));
        }
        let found = self
            .durations
            .iter()
            .find(|(f, t, _)| *f == from && *t == to)
            .map(|(_, _, duration)| Route {
                duration: *duration,
                distance: 0.0,
                weight_name: None,
            });
        Ok(match found {
            Some(route) => RouteResponse {
                code: "Ok".to_string(),
                message: None,
                routes: vec![route],
            },
            None => RouteResponse {
                code: "NoRoute".to_string(),
                message: Some("Impossible route between points".to_string()),
                routes: Vec::new(),
            },
        })
    }
}
