//! Driving routes from an OSRM instance.

use crate::config::ServiceConfig;
use crate::transport::error::TransportError;
use crate::transport::{build_client, send, status_error};
use crate::types::lon_lat::LonLat;
use log::info;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

const CODE_OK: &str = "Ok";
const CODE_NO_ROUTE: &str = "NoRoute";

/// The body of an OSRM `route` response.
///
/// `routes` holds zero or one route, since alternatives are never requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResponse {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub routes: Vec<Route>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Estimated travel time in seconds.
    pub duration: f64,
    /// Travelled distance in metres.
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub weight_name: Option<String>,
}

/// A routing service that can answer "how do I drive from here to there".
#[allow(async_fn_in_trait)]
pub trait RouteSource {
    /// Requests the route from `from` to `to`. Direction matters.
    ///
    /// A service answer of "no route" is a successful response with an empty `routes` list.
    async fn route(&self, from: LonLat, to: LonLat) -> Result<RouteResponse, TransportError>;
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    client: Client,
    base_url: String,
    profile: String,
}

impl OsrmClient {
    pub fn new(config: &ServiceConfig) -> Result<Self, TransportError> {
        Ok(Self {
            client: build_client(&config.user_agent, config.request_timeout)?,
            base_url: config.osrm_url.trim_end_matches('/').to_string(),
            profile: config.osrm_profile.clone(),
        })
    }

    fn route_url(&self, from: LonLat, to: LonLat) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}",
            self.base_url,
            self.profile,
            from.longitude(),
            from.latitude(),
            to.longitude(),
            to.latitude()
        )
    }
}

impl RouteSource for OsrmClient {
    async fn route(&self, from: LonLat, to: LonLat) -> Result<RouteResponse, TransportError> {
        let url = self.route_url(from, to);
        info!("Requesting OSRM route {}", url);

        let request = self.client.get(&url).query(&[("overview", "false")]);
        let response = send(request, &url).await?;
        read_route_response(&url, response).await
    }
}

// OSRM reports "NoRoute" with a 400 status, so the body is decoded before the status is judged.
async fn read_route_response(url: &str, response: Response) -> Result<RouteResponse, TransportError> {
    let status_err = response.error_for_status_ref().err();
    let body = response
        .bytes()
        .await
        .map_err(|e| TransportError::NetworkRequest(url.to_string(), e))?;

    decode_route_response(url, &body, status_err)
}

fn decode_route_response(
    url: &str,
    body: &[u8],
    status_err: Option<reqwest::Error>,
) -> Result<RouteResponse, TransportError> {
    match serde_json::from_slice::<RouteResponse>(body) {
        Ok(parsed) if parsed.code == CODE_OK || parsed.code == CODE_NO_ROUTE => Ok(parsed),
        Ok(parsed) => Err(TransportError::Service {
            url: url.to_string(),
            code: parsed.code,
            message: parsed.message.unwrap_or_default(),
        }),
        Err(e) => match status_err {
            Some(err) => Err(status_error(url, err)),
            None => Err(TransportError::JsonParse(url.to_string(), e)),
        },
    }
}
