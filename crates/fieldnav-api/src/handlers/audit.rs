use std::sync::Arc;

use axum::{extract::State, Json};
use fieldnav_core::models::AuditConnection;

use crate::dto::ApiResponse;
use crate::state::AppState;

pub async fn audit_status(State(state): State<Arc<AppState>>) -> Json<ApiResponse<AuditConnection>> {
    Json(ApiResponse::ok(state.dispatch.audit_status()))
}
