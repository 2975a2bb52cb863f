use fieldnav_core::models::{Coordinates, Geofence, JobSite};

use crate::distance::haversine_distance;

/// Distance from a geofence center, in meters
pub fn distance_to_center(geofence: &Geofence, point: &Coordinates) -> f64 {
    haversine_distance(point, &geofence.center)
}

/// Check if a point lies inside a geofence; the boundary counts as inside
pub fn contains(geofence: &Geofence, point: &Coordinates) -> bool {
    distance_to_center(geofence, point) <= geofence.radius_m
}

/// Membership of one point against one site's geofence
#[derive(Debug, Clone, Copy)]
pub struct GeofenceMembership<'a> {
    pub site: &'a JobSite,
    pub distance_m: f64,
    pub inside: bool,
}

/// Evaluate a point against every site independently, preserving site order
pub fn membership<'a>(point: &Coordinates, sites: &'a [JobSite]) -> Vec<GeofenceMembership<'a>> {
    sites
        .iter()
        .map(|site| {
            let distance_m = distance_to_center(&site.geofence, point);
            GeofenceMembership {
                site,
                distance_m,
                inside: distance_m <= site.geofence.radius_m,
            }
        })
        .collect()
}
