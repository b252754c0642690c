use crate::cache::error::CacheError;
use crate::transport::error::TransportError;
use std::num::ParseFloatError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("No search results for '{0}' were tagged as hospital")]
    NotFound(String),

    #[error("Search result '{place}' has a malformed {field} '{value}'")]
    MalformedCoordinate {
        place: String,
        field: &'static str,
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}
