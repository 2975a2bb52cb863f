//! FieldNav Geo - Distance, geofence membership, and coordinate validation
//!
//! This crate handles the geometric side of dispatch: great-circle distance between
//! worker and job positions, inclusive circular geofence tests, and rejection of
//! malformed coordinates before they reach the stores.

pub mod distance;
pub mod geofence;
pub mod validation;

pub use distance::{estimate_travel_minutes, haversine_distance, EARTH_RADIUS_M};
pub use geofence::{membership, GeofenceMembership};
pub use validation::{validate_coordinates, validate_radius};
