use crate::cache::disk_cache::DiskCache;
use crate::config::ServiceConfig;
use crate::geocoding::error::GeocodeError;
use crate::geocoding::nominatim::{NominatimClient, Place, PlaceSearch};
use crate::rate_limit::RateLimiter;
use crate::types::lon_lat::LonLat;
use log::{info, warn};
use std::path::Path;
use std::time::Duration;

pub const NOMINATIM_CACHE_NAME: &str = "nominatim_results";
/// Shortest spacing between Nominatim requests accepted by [`Geocoder::from_config`].
pub const NOMINATIM_MIN_INTERVAL: Duration = Duration::from_secs(1);
const HOSPITAL_KIND: &str = "hospital";

/// The resolved address and coordinates of a hospital.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedPlace {
    pub address: String,
    pub location: LonLat,
}

/// Resolves free-text hospital names to addresses and coordinates.
///
/// Searches are memoized in a [`DiskCache`] keyed by the exact query text, so an
/// identical query never reaches the network twice, not even across runs. Network
/// calls are paced by the geocoder's own [`RateLimiter`].
pub struct Geocoder<S = NominatimClient> {
    search: S,
    cache: DiskCache<String, Vec<Place>>,
    limiter: RateLimiter,
}

impl Geocoder<NominatimClient> {
    /// Creates a geocoder talking to the Nominatim instance in `config`, caching in `cache_dir`.
    ///
    /// Network calls are spaced by `config.nominatim_min_interval`, but never by less than
    /// [`NOMINATIM_MIN_INTERVAL`], the one request per second the public service allows.
    pub async fn from_config(cache_dir: &Path, config: &ServiceConfig) -> Result<Self, GeocodeError> {
        let client = NominatimClient::new(config)?;
        let min_interval = config.nominatim_min_interval.max(NOMINATIM_MIN_INTERVAL);
        if min_interval != config.nominatim_min_interval {
            warn!(
                "Nominatim interval of {:?} is below the usage policy, using {:?}",
                config.nominatim_min_interval, min_interval
            );
        }
        Self::open(client, cache_dir, min_interval).await
    }
}

impl<S: PlaceSearch> Geocoder<S> {
    pub fn new(search: S, cache: DiskCache<String, Vec<Place>>, min_interval: Duration) -> Self {
        Self {
            search,
            cache,
            limiter: RateLimiter::new("Nominatim", min_interval),
        }
    }

    /// Creates a geocoder backed by the `nominatim_results` store in `cache_dir`.
    pub async fn open(
        search: S,
        cache_dir: &Path,
        min_interval: Duration,
    ) -> Result<Self, GeocodeError> {
        let cache = DiskCache::open(cache_dir, NOMINATIM_CACHE_NAME).await?;
        Ok(Self::new(search, cache, min_interval))
    }

    /// Number of searches that actually went out over the network.
    pub fn network_calls(&self) -> u64 {
        self.limiter.calls()
    }

    /// Returns the raw candidate list for `free_text`, from the cache when possible.
    pub async fn search(&mut self, free_text: &str) -> Result<Vec<Place>, GeocodeError> {
        let Self {
            search,
            cache,
            limiter,
        } = self;
        cache
            .get_or_compute(free_text.to_string(), || async move {
                limiter.wait().await;
                search.search(free_text).await.map_err(GeocodeError::from)
            })
            .await
    }

    /// Resolves `free_text` to the first candidate tagged as a hospital.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::NotFound`] if no candidate has type `hospital`, and
    /// [`GeocodeError::MalformedCoordinate`] if the chosen candidate's coordinates don't parse.
    /// Transport and cache failures are passed through.
    pub async fn geocode(&mut self, free_text: &str) -> Result<GeocodedPlace, GeocodeError> {
        let places = self.search(free_text).await?;
        let place = first_hospital(&places)
            .ok_or_else(|| GeocodeError::NotFound(free_text.to_string()))?;

        let resolved = GeocodedPlace {
            address: place.display_name.clone(),
            location: LonLat(
                parse_coordinate(place, "longitude", &place.lon)?,
                parse_coordinate(place, "latitude", &place.lat)?,
            ),
        };
        info!("Resolved '{}' to {} ({})", free_text, resolved.address, resolved.location);
        Ok(resolved)
    }
}

fn first_hospital(places: &[Place]) -> Option<&Place> {
    places.iter().find(|place| place.kind == HOSPITAL_KIND)
}

fn parse_coordinate(place: &Place, field: &'static str, value: &str) -> Result<f64, GeocodeError> {
    value
        .trim()
        .parse()
        .map_err(|source| GeocodeError::MalformedCoordinate {
            place: place.display_name.clone(),
            field,
            value: value.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{place, FakePlaceSearch};
    use tempfile::tempdir;
    use tokio::time::Instant;

    async fn geocoder(search: FakePlaceSearch, dir: &Path) -> Geocoder<FakePlaceSearch> {
        Geocoder::open(search, dir, Duration::from_secs(1)).await.unwrap()
    }

    #[tokio::test]
    async fn returns_first_hospital_candidate() {
        let dir = tempdir().unwrap();
        let search = FakePlaceSearch::new().with(
            "Royal Hobart Hospital, Tasmania",
            vec![
                place("Liverpool Street bus stop", "bus_stop", "147.33", "-42.88"),
                place("Royal Hobart Hospital, Hobart", "hospital", "147.3294", "-42.8806"),
                place("Royal Hobart Hospital annex", "hospital", "147.0", "-42.0"),
            ],
        );
        let mut geocoder = geocoder(search, dir.path()).await;

        let resolved = geocoder
            .geocode("Royal Hobart Hospital, Tasmania")
            .await
            .unwrap();
        assert_eq!(resolved.address, "Royal Hobart Hospital, Hobart");
        assert_eq!(resolved.location, LonLat(147.3294, -42.8806));
    }

    #[tokio::test]
    async fn not_found_when_nothing_is_a_hospital() {
        let dir = tempdir().unwrap();
        let search = FakePlaceSearch::new().with(
            "Hobart",
            vec![
                place("Pancake Parlour", "restaurant", "147.33", "-42.88"),
                place("Hobart Interchange", "bus_station", "147.33", "-42.88"),
            ],
        );
        let mut geocoder = geocoder(search, dir.path()).await;

        let result = geocoder.geocode("Hobart").await;
        assert!(matches!(result, Err(GeocodeError::NotFound(q)) if q == "Hobart"));
    }

    #[tokio::test]
    async fn empty_response_is_not_found() {
        let dir = tempdir().unwrap();
        let mut geocoder = geocoder(FakePlaceSearch::new(), dir.path()).await;
        assert!(matches!(
            geocoder.geocode("Nowhere").await,
            Err(GeocodeError::NotFound(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_query_hits_network_once_without_pacing() {
        let dir = tempdir().unwrap();
        let search = FakePlaceSearch::new().with(
            "LGH",
            vec![place("Launceston General Hospital", "hospital", "147.1441", "-41.4332")],
        );
        let mut geocoder = geocoder(search, dir.path()).await;

        let first = geocoder.geocode("LGH").await.unwrap();
        let before_hit = Instant::now();
        let second = geocoder.geocode("LGH").await.unwrap();

        assert_eq!(before_hit.elapsed(), Duration::ZERO);
        assert_eq!(first, second);
        assert_eq!(geocoder.network_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn distinct_queries_are_paced() {
        let dir = tempdir().unwrap();
        let search = FakePlaceSearch::new()
            .with("A", vec![place("A", "hospital", "147.0", "-42.0")])
            .with("B", vec![place("B", "hospital", "146.0", "-41.0")]);
        let mut geocoder = geocoder(search, dir.path()).await;

        let start = Instant::now();
        geocoder.geocode("A").await.unwrap();
        geocoder.geocode("B").await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(1));
        assert_eq!(geocoder.network_calls(), 2);
    }

    #[tokio::test]
    async fn cached_results_survive_a_new_geocoder() {
        let dir = tempdir().unwrap();
        let search = FakePlaceSearch::new().with(
            "NWRH",
            vec![place("North West Regional Hospital", "hospital", "145.9", "-41.05")],
        );
        geocoder(search, dir.path()).await.geocode("NWRH").await.unwrap();

        // The second instance has nothing to answer with, so only the cache can.
        let mut offline = geocoder(FakePlaceSearch::new(), dir.path()).await;
        let resolved = offline.geocode("NWRH").await.unwrap();
        assert_eq!(resolved.location, LonLat(145.9, -41.05));
        assert_eq!(offline.network_calls(), 0);
    }

    #[tokio::test]
    async fn malformed_coordinates_are_reported() {
        let dir = tempdir().unwrap();
        let search = FakePlaceSearch::new().with(
            "Broken",
            vec![place("Broken Hospital", "hospital", "east-ish", "-42.0")],
        );
        let mut geocoder = geocoder(search, dir.path()).await;

        let result = geocoder.geocode("Broken").await;
        assert!(matches!(
            result,
            Err(GeocodeError::MalformedCoordinate { field: "longitude", .. })
        ));
    }

    #[tokio::test]
    async fn transport_failures_are_not_cached() {
        let dir = tempdir().unwrap();
        let search = FakePlaceSearch::new().failing("Flaky");
        let mut geocoder = geocoder(search, dir.path()).await;

        assert!(matches!(
            geocoder.geocode("Flaky").await,
            Err(GeocodeError::Transport(_))
        ));
        assert!(geocoder.cache.is_empty());
    }

    #[tokio::test]
    async fn from_config_never_paces_faster_than_once_a_second() {
        let dir = tempdir().unwrap();
        let eager = ServiceConfig::builder()
            .nominatim_min_interval(Duration::ZERO)
            .build();
        let geocoder = Geocoder::from_config(dir.path(), &eager).await.unwrap();
        assert_eq!(geocoder.limiter.min_interval(), NOMINATIM_MIN_INTERVAL);

        let patient = ServiceConfig::builder()
            .nominatim_min_interval(Duration::from_secs(3))
            .build();
        let geocoder = Geocoder::from_config(dir.path(), &patient).await.unwrap();
        assert_eq!(geocoder.limiter.min_interval(), Duration::from_secs(3));
    }
}
