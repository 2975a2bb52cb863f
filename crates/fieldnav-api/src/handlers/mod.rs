mod attendance;
mod audit;
mod expenses;
mod health;
mod jobs;
mod locations;
mod notifications;
mod sites;
mod timesheets;
mod workers;

pub use attendance::{check_in, check_out};
pub use audit::audit_status;
pub use expenses::{list_expenses, update_expense_status};
pub use health::health_check;
pub use jobs::{
    assign_job, create_job, get_job, list_jobs, list_jobs_by_status, optimal_workers,
    reassign_job, update_job_status,
};
pub use locations::{geofence_events, location_history, record_location};
pub use notifications::{list_notifications, mark_all_read, mark_read, unread_count};
pub use sites::{create_site, list_sites, sites_geojson};
pub use timesheets::{daily_timesheet, timesheet_summary, worker_timesheets};
pub use workers::{
    checkin_status, get_worker, list_worker_jobs, list_workers, nearby_workers,
    update_worker_status,
};

use serde::de::DeserializeOwned;

/// Parse a snake_case enum value received as a plain string
fn parse_enum<T: DeserializeOwned>(raw: &str) -> Option<T> {
    serde_json::from_value(serde_json::Value::String(raw.to_string())).ok()
}
