use serde::{Deserialize, Serialize};
use std::fmt;

use super::Coordinates;

/// Unique identifier for a job site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(pub u64);

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "site{}", self.0)
    }
}

/// Unique identifier for a geofence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeofenceId(pub u64);

impl fmt::Display for GeofenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "geo{}", self.0)
    }
}

/// Circular presence region around a job site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geofence {
    pub id: GeofenceId,
    pub name: String,
    pub center: Coordinates,

    /// Radius in meters; the boundary itself counts as inside
    pub radius_m: f64,

    /// Site this geofence belongs to
    pub site_id: SiteId,
}

/// Named work location with its geofence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSite {
    pub id: SiteId,
    pub name: String,
    pub address: String,
    pub coordinates: Coordinates,
    pub geofence: Geofence,
}

impl JobSite {
    /// Build a site whose geofence is centered on the site coordinates
    pub fn from_new(id: SiteId, geofence_id: GeofenceId, new: NewJobSite, default_radius_m: f64) -> Self {
        let geofence = Geofence {
            id: geofence_id,
            name: format!("{} Geofence", new.name),
            center: new.coordinates,
            radius_m: new.geofence_radius_m.unwrap_or(default_radius_m),
            site_id: id,
        };

        Self {
            id,
            name: new.name,
            address: new.address,
            coordinates: new.coordinates,
            geofence,
        }
    }
}

/// Fields supplied when registering a job site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewJobSite {
    pub name: String,
    #[serde(default)]
    pub address: String,
    pub coordinates: Coordinates,
    #[serde(default)]
    pub geofence_radius_m: Option<f64>,
}
