use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health_check))

        // Workers
        .route("/api/workers", get(handlers::list_workers))
        .route("/api/workers/nearby/{lat}/{lng}", get(handlers::nearby_workers))
        .route("/api/workers/{id}", get(handlers::get_worker))
        .route("/api/workers/{id}/status", put(handlers::update_worker_status))
        .route("/api/workers/{id}/jobs", get(handlers::list_worker_jobs))
        .route("/api/workers/{id}/checkin-status", get(handlers::checkin_status))

        // Jobs
        .route("/api/jobs", get(handlers::list_jobs).post(handlers::create_job))
        .route("/api/jobs/status/{status}", get(handlers::list_jobs_by_status))
        .route("/api/jobs/{id}", get(handlers::get_job))
        .route("/api/jobs/{id}/optimal-workers", get(handlers::optimal_workers))
        .route("/api/jobs/{id}/assign", put(handlers::assign_job))
        .route("/api/jobs/{id}/reassign", put(handlers::reassign_job))
        .route("/api/jobs/{id}/status", put(handlers::update_job_status))

        // Locations and geofences
        .route("/api/locations", post(handlers::record_location))
        .route("/api/locations/{id}", get(handlers::location_history))
        .route("/api/jobsites", get(handlers::list_sites).post(handlers::create_site))
        .route("/api/jobsites/geojson", get(handlers::sites_geojson))
        .route("/api/geofence-events/{id}", get(handlers::geofence_events))

        // Manual attendance
        .route("/api/checkin", post(handlers::check_in))
        .route("/api/checkout", post(handlers::check_out))

        // Timesheets and expenses
        .route("/api/timesheets/summary", get(handlers::timesheet_summary))
        .route("/api/timesheets/daily/{id}/{date}", get(handlers::daily_timesheet))
        .route("/api/timesheets/{id}", get(handlers::worker_timesheets))
        .route("/api/expenses/{id}", get(handlers::list_expenses))
        .route("/api/expenses/{id}/status", put(handlers::update_expense_status))

        // Notifications
        .route("/api/notifications/{id}", get(handlers::list_notifications))
        .route("/api/notifications/{id}/read", put(handlers::mark_read))
        .route("/api/notifications/{id}/mark-all-read", put(handlers::mark_all_read))
        .route("/api/notifications/{id}/unread-count", get(handlers::unread_count))

        // Audit ledger
        .route("/api/audit/status", get(handlers::audit_status))

        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
