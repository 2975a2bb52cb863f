//! Error types for FieldNav

use thiserror::Error;

use crate::models::{JobId, JobStatus, WorkerId, WorkerStatus};

#[derive(Debug, Error)]
pub enum FieldnavError {
    // Lookup errors
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    // Precondition errors
    #[error("Worker {worker_id} is not available for assignment (currently {status})")]
    WorkerUnavailable {
        worker_id: WorkerId,
        status: WorkerStatus,
    },

    #[error("Job {job_id} is {current}, operation requires {required}")]
    InvalidState {
        job_id: JobId,
        current: JobStatus,
        required: String,
    },

    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition { from: JobStatus, to: JobStatus },

    // Input errors
    #[error("Invalid coordinates: {reason}")]
    InvalidCoordinates { reason: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    // Collaborator errors
    #[error("{service} unavailable: {reason}")]
    Collaborator { service: String, reason: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl FieldnavError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound { entity, id: id.to_string() }
    }

    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput { field: field.into(), reason: reason.into() }
    }

    /// True for errors raised by a violated precondition rather than a missing entity.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::WorkerUnavailable { .. } | Self::InvalidState { .. } | Self::InvalidTransition { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, FieldnavError>;
