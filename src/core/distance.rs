use crate::models::GeoPoint;

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in kilometers, unrounded
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1 for antipodal points
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Great-circle distance between two points in kilometers
#[inline]
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    haversine_distance(a.lat, a.lng, b.lat, b.lng)
}

/// Round a distance to one decimal place for display
#[inline]
pub fn round_km(km: f64) -> f64 {
    (km * 10.0).round() / 10.0
}

/// Whether `point` lies within `radius_km` of either end of a route
pub fn is_near_endpoints(
    point: GeoPoint,
    route_start: GeoPoint,
    route_end: GeoPoint,
    radius_km: f64,
) -> bool {
    distance_km(point, route_start) <= radius_km || distance_km(point, route_end) <= radius_km
}

/// Render a distance as metres below one kilometre, otherwise km with one decimal
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{}m", (km * 1000.0).round())
    } else {
        format!("{:.1}km", km)
    }
}
