mod cache;
mod config;
mod error;
mod geocoding;
mod locator;
mod rate_limit;
mod routing;
mod selector;
mod transport;
mod types;
mod utils;

#[cfg(test)]
mod test_support;

pub use config::*;
pub use error::HospitalError;
pub use locator::*;

pub use cache::disk_cache::DiskCache;
pub use rate_limit::RateLimiter;

pub use geocoding::geocoder::{GeocodedPlace, Geocoder, NOMINATIM_CACHE_NAME, NOMINATIM_MIN_INTERVAL};
pub use geocoding::nominatim::{NominatimClient, Place, PlaceSearch};
pub use routing::osrm::{OsrmClient, Route, RouteResponse, RouteSource};
pub use routing::route_provider::{RouteProvider, OSRM_CACHE_NAME};
pub use selector::DistanceMetric;

pub use types::hospital::{Hospital, Rgb};
pub use types::lon_lat::LonLat;
pub use types::registry::{HospitalRegistry, TASMANIA};

pub use cache::error::CacheError;
pub use geocoding::error::GeocodeError;
pub use routing::error::RouteError;
pub use transport::error::TransportError;
