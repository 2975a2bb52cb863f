use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use fieldnav_core::models::{DailyTimesheet, TimesheetEntry, TimesheetSummaryRow, WorkerId};

use crate::dto::{ApiResponse, DateQuery, SummaryQuery};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn worker_timesheets(
    State(state): State<Arc<AppState>>,
    Path(worker_id): Path<String>,
    Query(query): Query<DateQuery>,
) -> Result<Json<ApiResponse<Vec<TimesheetEntry>>>, ApiError> {
    let entries = state.dispatch.timesheets(&WorkerId::new(worker_id), query.date).await?;
    Ok(Json(ApiResponse::ok(entries)))
}

pub async fn daily_timesheet(
    State(state): State<Arc<AppState>>,
    Path((worker_id, date)): Path<(String, NaiveDate)>,
) -> Result<Json<ApiResponse<DailyTimesheet>>, ApiError> {
    let daily = state.dispatch.daily_timesheet(&WorkerId::new(worker_id), date).await?;
    Ok(Json(ApiResponse::ok(daily)))
}

pub async fn timesheet_summary(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<ApiResponse<Vec<TimesheetSummaryRow>>>, ApiError> {
    let rows = state.dispatch.timesheet_summary(query.start_date, query.end_date).await?;
    Ok(Json(ApiResponse::ok(rows)))
}
