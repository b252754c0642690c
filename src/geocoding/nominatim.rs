//! Forward search against a Nominatim instance.

use crate::config::ServiceConfig;
use crate::transport::error::TransportError;
use crate::transport::{build_client, read_json, send};
use log::info;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// One candidate match returned by a Nominatim search.
///
/// Only the fields consumed by the geocoder are kept. Nominatim reports coordinates as
/// JSON strings, so `lon` and `lat` are stored verbatim and parsed when used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(default)]
    pub place_id: Option<u64>,
    /// Human-readable address of the match.
    pub display_name: String,
    /// Top-level OSM category, e.g. `amenity`.
    #[serde(default)]
    pub class: Option<String>,
    /// OSM type within the category, e.g. `hospital` or `bus_station`.
    #[serde(rename = "type")]
    pub kind: String,
    pub lon: String,
    pub lat: String,
}

/// A free-text place search service.
#[allow(async_fn_in_trait)]
pub trait PlaceSearch {
    /// Runs one search and returns the candidates in the order the service ranked them.
    async fn search(&self, query: &str) -> Result<Vec<Place>, TransportError>;
}

#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: Client,
    search_url: String,
}

impl NominatimClient {
    pub fn new(config: &ServiceConfig) -> Result<Self, TransportError> {
        Ok(Self {
            client: build_client(&config.user_agent, config.request_timeout)?,
            search_url: format!("{}/search", config.nominatim_url.trim_end_matches('/')),
        })
    }
}

impl PlaceSearch for NominatimClient {
    async fn search(&self, query: &str) -> Result<Vec<Place>, TransportError> {
        info!("Searching Nominatim for: {}", query);
        let request = self
            .client
            .get(&self.search_url)
            .query(&[("q", query), ("format", "json")]);
        let response = send(request, &self.search_url).await?;
        let places: Vec<Place> = read_json(response, &self.search_url).await?;
        info!("Nominatim returned {} candidates for {}", places.len(), query);
        Ok(places)
    }
}
