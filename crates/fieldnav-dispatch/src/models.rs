use chrono::{DateTime, Utc};
use fieldnav_core::models::{
    AuditStatus, Coordinates, GeofenceEvent, Job, JobId, JobStatus, LocationUpdate, SiteId,
    Worker, WorkerId, WorkerSummary,
};
use serde::{Deserialize, Serialize};

/// Available worker annotated with its distance to a target point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedWorker {
    #[serde(flatten)]
    pub worker: Worker,

    /// Great-circle distance to the target in meters
    pub distance_m: f64,

    /// Rough travel estimate in whole minutes
    pub estimated_travel_minutes: u32,
}

/// Ranked candidates for a job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimalWorkers {
    pub job_id: JobId,
    pub job_location: Coordinates,
    pub workers: Vec<RankedWorker>,

    /// Number of candidates returned
    pub total_available: usize,
}

/// Job enriched with a summary of its assignee
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobView {
    #[serde(flatten)]
    pub job: Job,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_worker: Option<WorkerSummary>,
}

/// Result of assign and reassign
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentOutcome {
    pub job: Job,
    pub worker: WorkerSummary,

    /// Worker released by a reassignment, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_worker_id: Option<WorkerId>,

    pub assigned_at: DateTime<Utc>,
    pub audit: AuditStatus,
}

/// Result of a job status transition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionOutcome {
    pub job: Job,
    pub previous_status: JobStatus,
    pub updated_at: DateTime<Utc>,
    pub audit: AuditStatus,
}

/// Automatic check-in or check-out triggered by a geofence crossing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteVisit {
    pub site_id: SiteId,
    pub site_name: String,
    pub timestamp: DateTime<Utc>,
    pub audit: AuditStatus,
}

/// Result of recording a location update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationOutcome {
    pub location_update: LocationUpdate,
    pub geofence_events: Vec<GeofenceEvent>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_check_in: Option<SiteVisit>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_check_out: Option<SiteVisit>,
}

/// Result of a manual check-in or check-out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualCheck {
    pub worker_id: WorkerId,
    pub location: Coordinates,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<JobId>,

    pub timestamp: DateTime<Utc>,
    pub audit: AuditStatus,
}

/// One open check-in as shown to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInView {
    pub site_id: SiteId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,

    pub check_in_time: DateTime<Utc>,
    pub location: Coordinates,
}

/// Current geofence check-ins of a worker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInStatus {
    pub worker_id: WorkerId,
    pub active_check_ins: Vec<CheckInView>,
    pub is_checked_in: bool,
}
