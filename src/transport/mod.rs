//! HTTP plumbing shared by the Nominatim and OSRM clients.

pub mod error;

use crate::transport::error::TransportError;
use log::warn;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub(crate) fn build_client(user_agent: &str, timeout: Duration) -> Result<Client, TransportError> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
        .map_err(TransportError::ClientBuild)
}

/// Sends a GET request, failing on transport errors only. The status is left to the caller.
pub(crate) async fn send(request: reqwest::RequestBuilder, url: &str) -> Result<Response, TransportError> {
    request
        .send()
        .await
        .map_err(|e| TransportError::NetworkRequest(url.to_string(), e))
}

/// Reads the body of a successful response and decodes it as JSON.
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: Response,
    url: &str,
) -> Result<T, TransportError> {
    let response = match response.error_for_status() {
        Ok(resp) => resp,
        Err(e) => {
            warn!("HTTP error for {}: {:?}", url, e);
            return Err(status_error(url, e));
        }
    };
    let body = response
        .bytes()
        .await
        .map_err(|e| TransportError::NetworkRequest(url.to_string(), e))?;
    serde_json::from_slice(&body).map_err(|e| TransportError::JsonParse(url.to_string(), e))
}

pub(crate) fn status_error(url: &str, e: reqwest::Error) -> TransportError {
    if let Some(status) = e.status() {
        TransportError::HttpStatus {
            url: url.to_string(),
            status,
            source: e,
        }
    } else {
        TransportError::NetworkRequest(url.to_string(), e)
    }
}
