use fieldnav_core::error::{FieldnavError, Result};
use fieldnav_core::models::Coordinates;

/// Reject non-finite or out-of-range WGS84 coordinates
pub fn validate_coordinates(coordinates: &Coordinates) -> Result<()> {
    let Coordinates { latitude, longitude } = *coordinates;

    if !latitude.is_finite() || !longitude.is_finite() {
        return Err(FieldnavError::InvalidCoordinates {
            reason: format!("coordinates must be finite, got {}", coordinates),
        });
    }

    if !(-90.0..=90.0).contains(&latitude) {
        return Err(FieldnavError::InvalidCoordinates {
            reason: format!("latitude {} outside [-90, 90]", latitude),
        });
    }

    if !(-180.0..=180.0).contains(&longitude) {
        return Err(FieldnavError::InvalidCoordinates {
            reason: format!("longitude {} outside [-180, 180]", longitude),
        });
    }

    Ok(())
}

/// Geofence radii must be positive and finite
pub fn validate_radius(radius_m: f64) -> Result<()> {
    if radius_m.is_finite() && radius_m > 0.0 {
        Ok(())
    } else {
        Err(FieldnavError::invalid_input(
            "geofence_radius_m",
            format!("radius must be a positive number of meters, got {}", radius_m),
        ))
    }
}
