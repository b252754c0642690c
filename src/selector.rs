//! Choosing the best hospital for a location.

use crate::routing::error::RouteError;
use crate::routing::osrm::RouteSource;
use crate::routing::route_provider::RouteProvider;
use crate::types::hospital::Hospital;
use crate::types::lon_lat::LonLat;
use crate::types::registry::HospitalRegistry;
use log::{info, warn};

/// How "nearest" is measured when assigning a location to a hospital.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DistanceMetric {
    /// Smallest squared planar distance between coordinates. Needs no network access.
    #[default]
    StraightLine,
    /// Shortest driving time from the location to the hospital, as reported by the
    /// routing service.
    TravelTime,
}

/// The hospital with the shortest driving time from `from`.
///
/// Hospitals are evaluated in registry order, and ties go to the earlier one. If any
/// hospital turns out to be unreachable the whole comparison is abandoned and `Ok(None)`
/// is returned; other failures are passed through as errors.
pub(crate) async fn nearest_by_travel_time<'a, R: RouteSource>(
    registry: &'a HospitalRegistry,
    from: LonLat,
    router: &mut RouteProvider<R>,
) -> Result<Option<&'a Hospital>, RouteError> {
    let mut best: Option<(&Hospital, f64)> = None;

    for hospital in registry.iter() {
        let duration = match router.route_duration(from, hospital.location()).await {
            Ok(duration) => duration,
            Err(RouteError::NoRouteFound { .. }) => {
                warn!(
                    "No route from ({}) to {}, abandoning travel-time comparison",
                    from, hospital
                );
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        if best.map_or(true, |(_, shortest)| duration < shortest) {
            best = Some((hospital, duration));
        }
    }

    if let Some((hospital, duration)) = best {
        info!(
            "Nearest hospital to ({}) by travel time: {} ({:.0} s, {:.1} km away)",
            from,
            hospital.name(),
            duration,
            from.haversine_km(&hospital.location())
        );
    }
    Ok(best.map(|(hospital, _)| hospital))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeRouteSource;
    use std::time::Duration;
    use tempfile::tempdir;

    const QUERY: LonLat = LonLat(146.8, -41.5);
    const H1: LonLat = LonLat(147.0, -42.8);
    const H2: LonLat = LonLat(147.1, -41.4);
    const H3: LonLat = LonLat(145.9, -41.1);

    fn registry() -> HospitalRegistry {
        HospitalRegistry::new(vec![
            Hospital::with_location("H1", "Tasmania", H1),
            Hospital::with_location("H2", "Tasmania", H2),
            Hospital::with_location("H3", "Tasmania", H3),
        ])
    }

    async fn router(source: FakeRouteSource) -> (tempfile::TempDir, RouteProvider<FakeRouteSource>) {
        let dir = tempdir().unwrap();
        let provider = RouteProvider::open(source, dir.path(), Duration::ZERO).await.unwrap();
        (dir, provider)
    }

    #[tokio::test]
    async fn picks_the_shortest_drive() {
        let registry = registry();
        let (_dir, mut router) = router(
            FakeRouteSource::new()
                .with(QUERY, H1, 9000.0)
                .with(QUERY, H2, 1500.0)
                .with(QUERY, H3, 4000.0),
        )
        .await;
        let nearest = nearest_by_travel_time(&registry, QUERY, &mut router)
            .await
            .unwrap();
        assert_eq!(nearest.map(Hospital::name), Some("H2"));
    }

    #[tokio::test]
    async fn equal_durations_go_to_registry_order() {
        let registry = registry();
        let (_dir, mut router) = router(
            FakeRouteSource::new()
                .with(QUERY, H1, 3000.0)
                .with(QUERY, H2, 2000.0)
                .with(QUERY, H3, 2000.0),
        )
        .await;
        let nearest = nearest_by_travel_time(&registry, QUERY, &mut router)
            .await
            .unwrap();
        assert_eq!(nearest.map(Hospital::name), Some("H2"));
    }

    #[tokio::test]
    async fn one_unreachable_hospital_abandons_the_comparison() {
        let registry = registry();
        // H3 has no route, even though H2 is reachable and quick.
        let (_dir, mut router) = router(
            FakeRouteSource::new()
                .with(QUERY, H1, 9000.0)
                .with(QUERY, H2, 1500.0),
        )
        .await;
        let nearest = nearest_by_travel_time(&registry, QUERY, &mut router)
            .await
            .unwrap();
        assert!(nearest.is_none());
    }

    #[tokio::test]
    async fn transport_failures_are_errors_not_none() {
        let registry = registry();
        let (_dir, mut router) = router(FakeRouteSource::new().failing()).await;
        let result = nearest_by_travel_time(&registry, QUERY, &mut router).await;
        assert!(matches!(result, Err(RouteError::Transport(_))));
    }

    #[tokio::test]
    async fn empty_registry_yields_none_without_lookups() {
        let registry = HospitalRegistry::default();
        let (_dir, mut router) = router(FakeRouteSource::new()).await;
        let nearest = nearest_by_travel_time(&registry, QUERY, &mut router)
            .await
            .unwrap();
        assert!(nearest.is_none());
        assert_eq!(router.network_calls(), 0);
    }
}
