use fieldnav_core::models::Coordinates;
use geo::Point;

/// Mean Earth radius used by the haversine formula, in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two coordinates in meters.
///
/// NaN or out-of-range inputs produce an unspecified (possibly NaN) result; validate
/// with [`crate::validate_coordinates`] first.
pub fn haversine_distance(a: &Coordinates, b: &Coordinates) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// Rough drive time: `minutes_per_km` minutes for every kilometer, rounded to whole minutes
pub fn estimate_travel_minutes(distance_m: f64, minutes_per_km: f64) -> u32 {
    let minutes = (distance_m / 1000.0 * minutes_per_km).round();
    if minutes.is_finite() && minutes > 0.0 {
        minutes as u32
    } else {
        0
    }
}

/// Convert to a `geo` point (x = longitude, y = latitude)
pub fn to_point(coordinates: &Coordinates) -> Point {
    Point::new(coordinates.longitude, coordinates.latitude)
}
