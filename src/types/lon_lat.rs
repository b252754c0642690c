//! Coordinate type shared by the geocoder, the route provider and the registry.

use haversine::{distance, Location as HaversineLocation, Units};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a geographical coordinate using longitude and latitude.
///
/// Longitude is the first element (index 0), and latitude is the second (index 1),
/// matching the order the routing service expects in its URLs.
///
/// # Examples
///
/// ```
/// use tas_hospitals::LonLat;
///
/// let hobart = LonLat(147.3257, -42.8826);
/// assert_eq!(hobart.longitude(), 147.3257);
/// assert_eq!(hobart.latitude(), -42.8826);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LonLat(pub f64, pub f64);

impl LonLat {
    pub fn longitude(&self) -> f64 {
        self.0
    }

    pub fn latitude(&self) -> f64 {
        self.1
    }

    /// Squared planar distance in degrees², treating longitude and latitude as
    /// Cartesian coordinates.
    ///
    /// This is the ranking used for straight-line hospital assignment. It is not a
    /// physical distance; see [`LonLat::haversine_km`] for that.
    ///
    /// ```
    /// use tas_hospitals::LonLat;
    ///
    /// let d2 = LonLat(147.0, -42.7).squared_distance(&LonLat(147.0, -42.8));
    /// assert!((d2 - 0.01).abs() < 1e-9);
    /// ```
    pub fn squared_distance(&self, other: &LonLat) -> f64 {
        let dx = self.0 - other.0;
        let dy = self.1 - other.1;
        dx * dx + dy * dy
    }

    /// Great-circle distance to `other` in kilometres.
    pub fn haversine_km(&self, other: &LonLat) -> f64 {
        distance(
            HaversineLocation {
                latitude: self.1,
                longitude: self.0,
            },
            HaversineLocation {
                latitude: other.1,
                longitude: other.0,
            },
            Units::Kilometers,
        )
    }
}

impl fmt::Display for LonLat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lon {}, lat {}", self.0, self.1)
    }
}
