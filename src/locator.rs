//! This module provides the main entry point for assigning locations to hospitals.
//! It ties together the geocoder, the route provider and the hospital registry.

use crate::config::ServiceConfig;
use crate::error::HospitalError;
use crate::geocoding::geocoder::{GeocodedPlace, Geocoder};
use crate::geocoding::nominatim::{NominatimClient, PlaceSearch};
use crate::routing::osrm::{OsrmClient, RouteSource};
use crate::routing::route_provider::RouteProvider;
use crate::selector::{nearest_by_travel_time, DistanceMetric};
use crate::types::hospital::Hospital;
use crate::types::lon_lat::LonLat;
use crate::types::registry::HospitalRegistry;
use crate::utils::{ensure_cache_dir_exists, get_cache_dir};
use bon::bon;
use log::debug;
use std::path::PathBuf;

/// Assigns locations to the nearest of a fixed set of hospitals.
///
/// Create an instance using [`HospitalLocator::new()`] to cache lookups in the working
/// directory, [`HospitalLocator::with_cache_folder()`] for another location, or
/// [`HospitalLocator::with_config()`] to point at different service instances. All three
/// resolve the four major Tasmanian public hospitals through Nominatim, which is slow the
/// first time and instant once the results are cached.
///
/// # Examples
///
/// ```no_run
/// # use tas_hospitals::{HospitalError, HospitalLocator, LonLat};
/// # #[tokio::main]
/// # async fn main() -> Result<(), HospitalError> {
/// let mut locator = HospitalLocator::new().await?;
/// let nearest = locator
///     .nearest_hospital()
///     .location(LonLat(147.25, -42.75))
///     .call()
///     .await?;
/// println!("{:?}", nearest.map(|h| h.name().to_string()));
/// # Ok(())
/// # }
/// ```
pub struct HospitalLocator<S = NominatimClient, R = OsrmClient> {
    geocoder: Geocoder<S>,
    router: RouteProvider<R>,
    registry: HospitalRegistry,
}

impl HospitalLocator {
    /// Creates a locator with caches in the current working directory.
    ///
    /// # Errors
    ///
    /// Returns [`HospitalError::CacheDirResolution`] if the working directory is unavailable,
    /// and otherwise the same errors as [`HospitalLocator::with_config`].
    pub async fn new() -> Result<Self, HospitalError> {
        let cache_folder = get_cache_dir().map_err(HospitalError::CacheDirResolution)?;
        Self::with_cache_folder(cache_folder).await
    }

    /// Creates a locator with default service settings and caches in `cache_folder`.
    pub async fn with_cache_folder(cache_folder: PathBuf) -> Result<Self, HospitalError> {
        Self::with_config(cache_folder, ServiceConfig::default()).await
    }

    /// Creates a locator from explicit service settings.
    ///
    /// # Errors
    ///
    /// Returns [`HospitalError::CacheDirCreation`] if `cache_folder` cannot be created,
    /// [`HospitalError::Geocode`] if the geocoding store can't be opened or one of the
    /// hospitals can't be resolved, and [`HospitalError::Route`] if the routing store
    /// can't be opened.
    pub async fn with_config(
        cache_folder: PathBuf,
        config: ServiceConfig,
    ) -> Result<Self, HospitalError> {
        ensure_cache_dir_exists(&cache_folder)
            .await
            .map_err(|e| HospitalError::CacheDirCreation(cache_folder.clone(), e))?;
        let mut geocoder = Geocoder::from_config(&cache_folder, &config).await?;
        let router = RouteProvider::from_config(&cache_folder, &config).await?;
        let registry = HospitalRegistry::tasmania(&mut geocoder).await?;
        Ok(Self::from_parts(geocoder, router, registry))
    }
}

#[bon]
impl<S: PlaceSearch, R: RouteSource> HospitalLocator<S, R> {
    /// Assembles a locator from already-built collaborators.
    pub fn from_parts(geocoder: Geocoder<S>, router: RouteProvider<R>, registry: HospitalRegistry) -> Self {
        Self {
            geocoder,
            router,
            registry,
        }
    }

    pub fn registry(&self) -> &HospitalRegistry {
        &self.registry
    }

    /// Resolves free text to the first matching hospital, see [`Geocoder::geocode`].
    pub async fn geocode(&mut self, free_text: &str) -> Result<GeocodedPlace, HospitalError> {
        Ok(self.geocoder.geocode(free_text).await?)
    }

    /// Driving time in seconds, see [`RouteProvider::route_duration`].
    pub async fn route_duration(&mut self, from: LonLat, to: LonLat) -> Result<f64, HospitalError> {
        Ok(self.router.route_duration(from, to).await?)
    }

    /// Finds the hospital a person at `location` would most likely attend.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.location(LonLat)`: **Required.** The point to assign.
    /// * `.metric(DistanceMetric)`: Optional. [`DistanceMetric::StraightLine`] (default)
    ///   ranks hospitals by squared coordinate distance without any network access;
    ///   [`DistanceMetric::TravelTime`] asks the routing service for the driving time to
    ///   every hospital and picks the shortest.
    ///
    /// # Returns
    ///
    /// `Ok(None)` if the registry is empty, or if any hospital is unreachable by road when
    /// ranking by travel time. Ties go to the hospital listed first in the registry.
    ///
    /// # Errors
    ///
    /// Returns [`HospitalError::Route`] if a routing lookup fails for a reason other than
    /// "no route".
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use tas_hospitals::{DistanceMetric, HospitalError, HospitalLocator, LonLat};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), HospitalError> {
    /// let mut locator = HospitalLocator::new().await?;
    /// let by_road = locator
    ///     .nearest_hospital()
    ///     .location(LonLat(146.35, -41.18))
    ///     .metric(DistanceMetric::TravelTime)
    ///     .call()
    ///     .await?;
    /// if let Some(hospital) = by_road {
    ///     println!("Quickest drive: {hospital}");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn nearest_hospital(
        &mut self,
        location: LonLat,
        metric: Option<DistanceMetric>,
    ) -> Result<Option<Hospital>, HospitalError> {
        let metric = metric.unwrap_or_default();
        debug!("Finding nearest hospital to ({}) by {:?}", location, metric);

        let nearest = match metric {
            DistanceMetric::StraightLine => self.registry.nearest_by_straight_line(location),
            DistanceMetric::TravelTime => {
                nearest_by_travel_time(&self.registry, location, &mut self.router).await?
            }
        };
        Ok(nearest.cloned())
    }
}
