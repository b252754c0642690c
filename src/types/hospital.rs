//! A hospital that locations can be assigned to.

use crate::geocoding::error::GeocodeError;
use crate::geocoding::geocoder::Geocoder;
use crate::geocoding::nominatim::PlaceSearch;
use crate::types::lon_lat::LonLat;
use std::fmt;

/// A display color, used when plotting hospital catchments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// A named hospital with a resolved location.
///
/// Hospitals are built once, either from known coordinates with
/// [`Hospital::with_location`] or by geocoding their name with [`Hospital::resolve`],
/// and are not changed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Hospital {
    name: String,
    state: String,
    address: Option<String>,
    location: LonLat,
    color: Option<Rgb>,
}

impl Hospital {
    /// Creates a hospital at a known location. The address stays unknown.
    pub fn with_location(name: impl Into<String>, state: impl Into<String>, location: LonLat) -> Self {
        Self {
            name: name.into(),
            state: state.into(),
            address: None,
            location,
            color: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    /// Looks up `"<name>, <state>"` with the geocoder and builds the hospital from the
    /// first result tagged as a hospital.
    pub async fn resolve<S: PlaceSearch>(
        name: &str,
        state: &str,
        color: Option<Rgb>,
        geocoder: &mut Geocoder<S>,
    ) -> Result<Self, GeocodeError> {
        let resolved = geocoder.geocode(&Self::search_text(name, state)).await?;
        Ok(Self {
            name: name.to_string(),
            state: state.to_string(),
            address: Some(resolved.address),
            location: resolved.location,
            color,
        })
    }

    pub fn search_text(name: &str, state: &str) -> String {
        format!("{name}, {state}")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn location(&self) -> LonLat {
        self.location
    }

    pub fn color(&self) -> Option<Rgb> {
        self.color
    }
}

impl fmt::Display for Hospital {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.location)
    }
}
