use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use fieldnav_core::models::{GeofenceEvent, LocationUpdate, WorkerId};
use fieldnav_dispatch::LocationOutcome;

use crate::dto::{ApiResponse, LocationRequest};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn record_location(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LocationRequest>,
) -> Result<Json<ApiResponse<LocationOutcome>>, ApiError> {
    if request.worker_id.trim().is_empty() {
        return Err(ApiError::bad_request("LOCATION_001", "Worker ID and coordinates required"));
    }

    let outcome = state
        .dispatch
        .record_location(&WorkerId::new(request.worker_id), request.coordinates, request.accuracy)
        .await?;
    Ok(Json(ApiResponse::ok(outcome)))
}

pub async fn location_history(
    State(state): State<Arc<AppState>>,
    Path(worker_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<LocationUpdate>>>, ApiError> {
    let history = state.dispatch.location_history(&WorkerId::new(worker_id)).await?;
    Ok(Json(ApiResponse::ok(history)))
}

pub async fn geofence_events(
    State(state): State<Arc<AppState>>,
    Path(worker_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<GeofenceEvent>>>, ApiError> {
    let events = state.dispatch.geofence_events(&WorkerId::new(worker_id)).await?;
    Ok(Json(ApiResponse::ok(events)))
}
