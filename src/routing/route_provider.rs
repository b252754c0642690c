use crate::cache::disk_cache::DiskCache;
use crate::config::ServiceConfig;
use crate::rate_limit::RateLimiter;
use crate::routing::error::RouteError;
use crate::routing::osrm::{OsrmClient, RouteResponse, RouteSource};
use crate::types::lon_lat::LonLat;
use log::debug;
use ordered_float::OrderedFloat;
use std::path::Path;
use std::time::Duration;

pub const OSRM_CACHE_NAME: &str = "osrm_results";

/// Origin longitude, origin latitude, destination longitude, destination latitude.
type RouteKey = [OrderedFloat<f64>; 4];

fn route_key(from: LonLat, to: LonLat) -> RouteKey {
    [from.0, from.1, to.0, to.1].map(OrderedFloat)
}

/// Driving durations between coordinate pairs, memoized on disk.
///
/// The cache key is the four coordinates in call order, so `A -> B` and `B -> A` are
/// looked up and stored independently.
pub struct RouteProvider<R = OsrmClient> {
    source: R,
    cache: DiskCache<RouteKey, RouteResponse>,
    limiter: RateLimiter,
}

impl RouteProvider<OsrmClient> {
    pub async fn from_config(cache_dir: &Path, config: &ServiceConfig) -> Result<Self, RouteError> {
        let client = OsrmClient::new(config)?;
        Self::open(client, cache_dir, config.osrm_min_interval).await
    }
}

impl<R: RouteSource> RouteProvider<R> {
    pub fn new(source: R, cache: DiskCache<RouteKey, RouteResponse>, min_interval: Duration) -> Self {
        Self {
            source,
            cache,
            limiter: RateLimiter::new("OSRM", min_interval),
        }
    }

    /// Creates a provider backed by the `osrm_results` store in `cache_dir`.
    pub async fn open(
        source: R,
        cache_dir: &Path,
        min_interval: Duration,
    ) -> Result<Self, RouteError> {
        let cache = DiskCache::open(cache_dir, OSRM_CACHE_NAME).await?;
        Ok(Self::new(source, cache, min_interval))
    }

    pub fn network_calls(&self) -> u64 {
        self.limiter.calls()
    }

    /// Returns the raw routing response for `from -> to`, from the cache when possible.
    pub async fn route(&mut self, from: LonLat, to: LonLat) -> Result<RouteResponse, RouteError> {
        let Self {
            source,
            cache,
            limiter,
        } = self;
        cache
            .get_or_compute(route_key(from, to), || async move {
                limiter.wait().await;
                source.route(from, to).await.map_err(RouteError::from)
            })
            .await
    }

    /// Driving time from `from` to `to`, in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::NoRouteFound`] when the service found no route. Transport and
    /// cache failures are reported as their own variants.
    pub async fn route_duration(&mut self, from: LonLat, to: LonLat) -> Result<f64, RouteError> {
        let response = self.route(from, to).await?;
        let route = response
            .routes
            .first()
            .ok_or(RouteError::NoRouteFound { from, to })?;
        debug!(
            "Route ({}) -> ({}): {:.1} s over {:.0} m",
            from, to, route.duration, route.distance
        );
        Ok(route.duration)
    }
}
