use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use fieldnav_core::models::{ExpenseEntry, ExpenseId, ExpenseStatus, WorkerId};
use uuid::Uuid;

use super::parse_enum;
use crate::dto::{ApiResponse, ExpenseQuery, ExpenseStatusRequest};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_expenses(
    State(state): State<Arc<AppState>>,
    Path(worker_id): Path<String>,
    Query(query): Query<ExpenseQuery>,
) -> Result<Json<ApiResponse<Vec<ExpenseEntry>>>, ApiError> {
    let status = match query.status.as_deref() {
        Some(raw) => Some(parse_status(raw)?),
        None => None,
    };

    let expenses = state.dispatch.expenses(&WorkerId::new(worker_id), query.date, status).await?;
    Ok(Json(ApiResponse::ok(expenses)))
}

pub async fn update_expense_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<ExpenseStatusRequest>,
) -> Result<Json<ApiResponse<ExpenseEntry>>, ApiError> {
    // Unparseable ids cannot name an existing expense
    let id = Uuid::parse_str(&id)
        .map(ExpenseId)
        .map_err(|_| ApiError::not_found("EXPENSE_001", "Expense not found"))?;
    state.dispatch.get_expense(id).await?;

    let status = parse_status(&request.status)?;
    let expense = state.dispatch.set_expense_status(id, status).await?;
    Ok(Json(ApiResponse::ok(expense)))
}

fn parse_status(raw: &str) -> Result<ExpenseStatus, ApiError> {
    parse_enum(raw).ok_or_else(|| {
        ApiError::bad_request("EXPENSE_002", "Invalid status")
            .with_details(format!("expected pending, approved or rejected, got {}", raw))
    })
}
