use tas_hospitals::{DistanceMetric, HospitalError, HospitalLocator, LonLat};

#[tokio::main]
async fn main() -> Result<(), HospitalError> {
    let mut locator = HospitalLocator::new().await?;
    for hospital in locator.registry().iter() {
        println!("{hospital}");
    }

    // Somewhere between Devonport and Launceston
    let location = LonLat(146.65, -41.3);
    let by_line = locator
        .nearest_hospital()
        .location(location)
        .call()
        .await?;
    let by_road = locator
        .nearest_hospital()
        .location(location)
        .metric(DistanceMetric::TravelTime)
        .call()
        .await?;

    println!("Nearest on the map: {:?}", by_line.map(|h| h.name().to_string()));
    println!("Quickest drive:     {:?}", by_road.map(|h| h.name().to_string()));
    Ok(())
}
