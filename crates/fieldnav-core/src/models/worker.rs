use serde::{Deserialize, Serialize};
use std::fmt;

use super::Coordinates;

/// Unique identifier for a worker, issued by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkerId(pub String);

impl WorkerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WorkerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Availability of a field worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerStatus {
    Available,
    Busy,
    Offline,
}

impl WorkerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkerStatus::Available => "available",
            WorkerStatus::Busy => "busy",
            WorkerStatus::Offline => "offline",
        }
    }
}

impl fmt::Display for WorkerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field worker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worker {
    /// Unique identifier
    pub id: WorkerId,

    /// Login email
    pub email: String,

    pub first_name: String,
    pub last_name: String,
    pub phone: String,

    /// Payroll identifier (e.g. "EMP001")
    pub employee_id: String,

    /// Team the worker belongs to
    pub team_id: String,

    /// Current availability
    pub current_status: WorkerStatus,

    /// Last reported position, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_location: Option<Coordinates>,
}

impl Worker {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_available(&self) -> bool {
        self.current_status == WorkerStatus::Available
    }
}

/// Reduced worker view embedded in job and assignment responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerSummary {
    pub id: WorkerId,
    pub first_name: String,
    pub last_name: String,
    pub current_status: WorkerStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_location: Option<Coordinates>,
}

impl From<&Worker> for WorkerSummary {
    fn from(worker: &Worker) -> Self {
        Self {
            id: worker.id.clone(),
            first_name: worker.first_name.clone(),
            last_name: worker.last_name.clone(),
            current_status: worker.current_status,
            current_location: worker.current_location,
        }
    }
}
