use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use fieldnav_core::models::{Job, JobId, JobStatus, NewJob, WorkerId};
use fieldnav_dispatch::{AssignmentOutcome, JobView, OptimalWorkers, TransitionOutcome};

use super::parse_enum;
use crate::dto::{ApiResponse, AssignRequest, JobStatusRequest, OptimalWorkersQuery};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_jobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Job>>>, ApiError> {
    let jobs = state.dispatch.list_jobs().await?;
    Ok(Json(ApiResponse::ok(jobs)))
}

pub async fn create_job(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NewJob>,
) -> Result<(StatusCode, Json<ApiResponse<Job>>), ApiError> {
    tracing::info!(title = %request.title, "Creating job");

    let job = state.dispatch.create_job(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(job))))
}

pub async fn get_job(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<Job>>, ApiError> {
    let job = state.dispatch.get_job(JobId(id)).await?;
    Ok(Json(ApiResponse::ok(job)))
}

pub async fn list_jobs_by_status(
    State(state): State<Arc<AppState>>,
    Path(status): Path<String>,
) -> Result<Json<ApiResponse<Vec<JobView>>>, ApiError> {
    // Unknown statuses match nothing
    let jobs = match parse_enum::<JobStatus>(&status) {
        Some(status) => state.dispatch.list_jobs_by_status(status).await?,
        None => Vec::new(),
    };
    Ok(Json(ApiResponse::ok(jobs)))
}

pub async fn optimal_workers(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Query(query): Query<OptimalWorkersQuery>,
) -> Result<Json<ApiResponse<OptimalWorkers>>, ApiError> {
    let ranked = state
        .dispatch
        .find_optimal_workers(JobId(id), query.max_distance, query.limit)
        .await?;
    Ok(Json(ApiResponse::ok(ranked)))
}

pub async fn assign_job(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(request): Json<AssignRequest>,
) -> Result<Json<ApiResponse<AssignmentOutcome>>, ApiError> {
    tracing::info!(job_id = id, worker_id = %request.worker_id, "Assigning job");

    let outcome = state.dispatch.assign(JobId(id), &WorkerId::new(request.worker_id)).await?;
    Ok(Json(ApiResponse::ok(outcome)))
}

pub async fn reassign_job(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(request): Json<AssignRequest>,
) -> Result<Json<ApiResponse<AssignmentOutcome>>, ApiError> {
    tracing::info!(job_id = id, worker_id = %request.worker_id, "Reassigning job");

    let outcome = state.dispatch.reassign(JobId(id), &WorkerId::new(request.worker_id)).await?;
    Ok(Json(ApiResponse::ok(outcome)))
}

pub async fn update_job_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(request): Json<JobStatusRequest>,
) -> Result<Json<ApiResponse<TransitionOutcome>>, ApiError> {
    let status = parse_enum::<JobStatus>(&request.status).ok_or_else(|| {
        ApiError::bad_request("JOB_004", format!("Unknown job status: {}", request.status))
    })?;

    let outcome = state.dispatch.transition_status(JobId(id), status).await?;
    Ok(Json(ApiResponse::ok(outcome)))
}
