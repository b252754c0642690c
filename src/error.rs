use crate::geocoding::error::GeocodeError;
use crate::routing::error::RouteError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HospitalError {
    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to determine cache directory")]
    CacheDirResolution(#[source] std::io::Error),
}
