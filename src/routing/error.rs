use crate::cache::error::CacheError;
use crate::transport::error::TransportError;
use crate::types::lon_lat::LonLat;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("No route found from ({from}) to ({to})")]
    NoRouteFound { from: LonLat, to: LonLat },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}
