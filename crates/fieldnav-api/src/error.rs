use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fieldnav_core::error::FieldnavError;
use serde::Serialize;

/// Unified API error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message)
    }

    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, code, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_001", message)
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Replace the code, keeping status and message
    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = code;
        self
    }
}

#[derive(Serialize)]
struct ErrorDetail {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: ErrorDetail,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            error: ErrorDetail {
                code: self.code,
                message: self.message,
                details: self.details,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn not_found_code(entity: &str) -> &'static str {
    match entity {
        "Worker" => "WORKER_001",
        "Job" => "JOB_001",
        "Job site" => "JOBSITE_002",
        "Expense" => "EXPENSE_001",
        "Notification" => "NOTIFICATION_001",
        _ => "NOT_FOUND_001",
    }
}

impl From<FieldnavError> for ApiError {
    fn from(err: FieldnavError) -> Self {
        let message = err.to_string();
        match &err {
            FieldnavError::NotFound { entity, .. } => {
                Self::not_found(not_found_code(entity), format!("{} not found", entity))
                    .with_details(message)
            }
            FieldnavError::WorkerUnavailable { .. } => {
                Self::new(StatusCode::CONFLICT, "JOB_002", message)
            }
            FieldnavError::InvalidState { .. } => Self::new(StatusCode::CONFLICT, "JOB_003", message),
            FieldnavError::InvalidTransition { .. } => Self::bad_request("JOB_004", message),
            FieldnavError::InvalidCoordinates { .. } => Self::bad_request("LOCATION_001", message),
            FieldnavError::InvalidInput { .. } => Self::bad_request("VALIDATION_001", message),
            FieldnavError::Collaborator { .. } => {
                tracing::warn!(error = %err, "Collaborator failure reached the API");
                Self::new(StatusCode::BAD_GATEWAY, "COLLABORATOR_001", message)
            }
            _ => {
                tracing::error!(error = %err, "Internal error");
                Self::internal("Internal error").with_details(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldnav_core::models::{JobId, JobStatus, WorkerId, WorkerStatus};

    #[test]
    fn test_lookup_errors_map_to_entity_codes() {
        let err = ApiError::from(FieldnavError::not_found("Worker", "99"));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.code, "WORKER_001");
        assert_eq!(err.message, "Worker not found");

        let err = ApiError::from(FieldnavError::not_found("Notification", "abc"));
        assert_eq!(err.code, "NOTIFICATION_001");
    }

    #[test]
    fn test_precondition_errors_conflict() {
        let err = ApiError::from(FieldnavError::WorkerUnavailable {
            worker_id: WorkerId::from("4"),
            status: WorkerStatus::Busy,
        });
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.code, "JOB_002");

        let err = ApiError::from(FieldnavError::InvalidState {
            job_id: JobId(1),
            current: JobStatus::Assigned,
            required: "pending".to_string(),
        });
        assert_eq!(err.code, "JOB_003");

        let err = ApiError::from(FieldnavError::InvalidTransition {
            from: JobStatus::Pending,
            to: JobStatus::Completed,
        });
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "JOB_004");
        assert_eq!(err.message, "Invalid status transition from pending to completed");
    }

    #[test]
    fn test_collaborator_is_bad_gateway() {
        let err = ApiError::from(FieldnavError::Collaborator {
            service: "audit ledger".to_string(),
            reason: "down".to_string(),
        });
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
    }
}
