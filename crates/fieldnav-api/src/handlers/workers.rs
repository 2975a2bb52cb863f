use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use fieldnav_core::models::{Coordinates, Job, Worker, WorkerId};
use fieldnav_dispatch::{CheckInStatus, RankedWorker};

use crate::dto::{ApiResponse, NearbyQuery, UpdateWorkerStatusRequest, WorkerJobsQuery};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_workers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Worker>>>, ApiError> {
    let workers = state.dispatch.list_workers().await?;
    Ok(Json(ApiResponse::ok(workers)))
}

pub async fn get_worker(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Worker>>, ApiError> {
    let worker = state.dispatch.get_worker(&WorkerId::new(id)).await?;
    Ok(Json(ApiResponse::ok(worker)))
}

pub async fn update_worker_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<UpdateWorkerStatusRequest>,
) -> Result<Json<ApiResponse<Worker>>, ApiError> {
    tracing::info!(worker_id = %id, status = %request.status, "Updating worker status");

    let worker = state.dispatch.set_worker_status(&WorkerId::new(id), request.status).await?;
    Ok(Json(ApiResponse::ok(worker)))
}

pub async fn list_worker_jobs(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<WorkerJobsQuery>,
) -> Result<Json<ApiResponse<Vec<Job>>>, ApiError> {
    let jobs = state.dispatch.list_jobs_by_worker(&WorkerId::new(id), query.status).await?;
    Ok(Json(ApiResponse::ok(jobs)))
}

pub async fn checkin_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CheckInStatus>>, ApiError> {
    let status = state.dispatch.check_in_status(&WorkerId::new(id)).await?;
    Ok(Json(ApiResponse::ok(status)))
}

pub async fn nearby_workers(
    State(state): State<Arc<AppState>>,
    Path((lat, lng)): Path<(f64, f64)>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<ApiResponse<Vec<RankedWorker>>>, ApiError> {
    tracing::debug!(lat, lng, radius = ?query.radius, "Finding nearby workers");

    let workers = state.dispatch.find_nearby_workers(Coordinates::new(lat, lng), query.radius).await?;
    Ok(Json(ApiResponse::ok(workers)))
}
