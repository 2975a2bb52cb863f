use chrono::NaiveDate;
use fieldnav_core::models::{Coordinates, JobStatus, WorkerStatus};
use serde::Deserialize;

/// Body of `PUT /api/workers/{id}/status`
#[derive(Debug, Deserialize)]
pub struct UpdateWorkerStatusRequest {
    pub status: WorkerStatus,
}

/// Body of assign and reassign
#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    pub worker_id: String,
}

/// Body of `PUT /api/jobs/{id}/status`
#[derive(Debug, Deserialize)]
pub struct JobStatusRequest {
    pub status: String,
}

/// Body of `PUT /api/expenses/{id}/status`
#[derive(Debug, Deserialize)]
pub struct ExpenseStatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct LocationRequest {
    pub worker_id: String,
    pub coordinates: Coordinates,
    pub accuracy: Option<f64>,
}

/// Body of manual check-in and check-out
#[derive(Debug, Deserialize)]
pub struct AttendanceRequest {
    pub worker_id: String,
    pub location: Coordinates,
    pub job_id: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OptimalWorkersQuery {
    pub max_distance: Option<f64>,
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NearbyQuery {
    pub radius: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WorkerJobsQuery {
    pub status: Option<JobStatus>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DateQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExpenseQuery {
    pub date: Option<NaiveDate>,
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NotificationQuery {
    #[serde(default)]
    pub unread_only: bool,
}
