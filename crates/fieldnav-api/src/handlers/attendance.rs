use std::sync::Arc;

use axum::{extract::State, Json};
use fieldnav_core::models::{JobId, WorkerId};
use fieldnav_dispatch::ManualCheck;

use crate::dto::{ApiResponse, AttendanceRequest};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn check_in(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AttendanceRequest>,
) -> Result<Json<ApiResponse<ManualCheck>>, ApiError> {
    if request.worker_id.trim().is_empty() {
        return Err(ApiError::bad_request("CHECKIN_001", "Worker ID and location required"));
    }

    let check = state
        .dispatch
        .manual_check_in(
            &WorkerId::new(request.worker_id),
            request.location,
            request.job_id.map(JobId),
        )
        .await?;
    Ok(Json(ApiResponse::ok(check)))
}

pub async fn check_out(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AttendanceRequest>,
) -> Result<Json<ApiResponse<ManualCheck>>, ApiError> {
    if request.worker_id.trim().is_empty() {
        return Err(ApiError::bad_request("CHECKOUT_001", "Worker ID and location required"));
    }

    let check = state
        .dispatch
        .manual_check_out(
            &WorkerId::new(request.worker_id),
            request.location,
            request.job_id.map(JobId),
        )
        .await?;
    Ok(Json(ApiResponse::ok(check)))
}
