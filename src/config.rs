//! Endpoints and request settings for the external services.

use bon::Builder;
use std::time::Duration;

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_OSRM_URL: &str = "http://router.project-osrm.org";
pub const DEFAULT_OSRM_PROFILE: &str = "car";
pub const DEFAULT_USER_AGENT: &str = concat!(
    env!("CARGO_PKG_NAME"),
    "/",
    env!("CARGO_PKG_VERSION")
);

/// Settings shared by the geocoder and the route provider.
///
/// Every field has a default, so `ServiceConfig::default()` is enough to talk to the
/// public OpenStreetMap services. Nominatim's usage policy allows at most one request
/// per second, which is the default `nominatim_min_interval`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use tas_hospitals::ServiceConfig;
///
/// let config = ServiceConfig::builder()
///     .osrm_url("http://localhost:5000")
///     .request_timeout(Duration::from_secs(5))
///     .build();
/// assert_eq!(config.osrm_profile, "car");
/// assert_eq!(config.nominatim_min_interval, Duration::from_secs(1));
/// ```
#[derive(Debug, Clone, Builder)]
pub struct ServiceConfig {
    /// Base URL of the Nominatim instance, without the `/search` path.
    #[builder(into, default = DEFAULT_NOMINATIM_URL.to_string())]
    pub nominatim_url: String,

    /// Base URL of the OSRM instance, without the `/route` path.
    #[builder(into, default = DEFAULT_OSRM_URL.to_string())]
    pub osrm_url: String,

    /// OSRM routing profile.
    #[builder(into, default = DEFAULT_OSRM_PROFILE.to_string())]
    pub osrm_profile: String,

    #[builder(into, default = DEFAULT_USER_AGENT.to_string())]
    pub user_agent: String,

    #[builder(default = Duration::from_secs(30))]
    pub request_timeout: Duration,

    /// Minimum spacing between two Nominatim network calls. Values below one second
    /// are raised to one second by [`Geocoder::from_config`](crate::Geocoder::from_config),
    /// since the public service allows no more than one request per second.
    #[builder(default = Duration::from_secs(1))]
    pub nominatim_min_interval: Duration,

    /// Minimum spacing between two OSRM network calls.
    #[builder(default = Duration::ZERO)]
    pub osrm_min_interval: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_public_services() {
        let config = ServiceConfig::default();
        assert_eq!(config.nominatim_url, DEFAULT_NOMINATIM_URL);
        assert_eq!(config.osrm_url, DEFAULT_OSRM_URL);
        assert_eq!(config.osrm_min_interval, Duration::ZERO);
        assert!(config.user_agent.starts_with("tas-hospitals/"));
    }

    #[test]
    fn builder_overrides_single_fields() {
        let config = ServiceConfig::builder()
            .nominatim_url("http://127.0.0.1:8080")
            .nominatim_min_interval(Duration::from_millis(1500))
            .build();
        assert_eq!(config.nominatim_url, "http://127.0.0.1:8080");
        assert_eq!(config.nominatim_min_interval, Duration::from_millis(1500));
        assert_eq!(config.osrm_url, DEFAULT_OSRM_URL);
    }
}
