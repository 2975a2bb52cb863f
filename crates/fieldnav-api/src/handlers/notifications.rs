use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use fieldnav_core::models::{Notification, NotificationId};
use uuid::Uuid;

use crate::dto::{ApiResponse, MarkedCountResponse, NotificationQuery, UnreadCountResponse};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_notifications(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(query): Query<NotificationQuery>,
) -> Result<Json<ApiResponse<Vec<Notification>>>, ApiError> {
    let notifications = state.dispatch.notifications(&user_id, query.unread_only).await?;
    Ok(Json(ApiResponse::ok(notifications)))
}

pub async fn mark_read(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Notification>>, ApiError> {
    let id = Uuid::parse_str(&id)
        .map(NotificationId)
        .map_err(|_| ApiError::not_found("NOTIFICATION_001", "Notification not found"))?;

    let notification = state.dispatch.mark_notification_read(id).await?;
    Ok(Json(ApiResponse::ok(notification)))
}

pub async fn mark_all_read(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<MarkedCountResponse>>, ApiError> {
    let marked_count = state.dispatch.mark_all_notifications_read(&user_id).await?;
    Ok(Json(ApiResponse::ok(MarkedCountResponse { marked_count })))
}

pub async fn unread_count(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<UnreadCountResponse>>, ApiError> {
    let count = state.dispatch.unread_notification_count(&user_id).await?;
    Ok(Json(ApiResponse::ok(UnreadCountResponse { count })))
}
