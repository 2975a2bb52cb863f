//! Audit trail records sent to the external audit ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{Coordinates, JobId, SiteId, WorkerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventKind {
    CheckIn,
    CheckOut,
    JobAssignment,
    JobCompletion,
}

/// Event submitted to the audit notifier after a state change has committed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub worker_id: WorkerId,
    pub kind: AuditEventKind,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<JobId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_id: Option<SiteId>,
}

impl AuditEvent {
    pub fn new(worker_id: WorkerId, kind: AuditEventKind, timestamp: DateTime<Utc>) -> Self {
        Self {
            worker_id,
            kind,
            timestamp,
            location: None,
            job_id: None,
            site_id: None,
        }
    }

    pub fn with_location(mut self, location: Option<Coordinates>) -> Self {
        self.location = location;
        self
    }

    pub fn with_job(mut self, job_id: JobId) -> Self {
        self.job_id = Some(job_id);
        self
    }

    pub fn with_site(mut self, site_id: SiteId) -> Self {
        self.site_id = Some(site_id);
        self
    }

    /// Hex SHA-256 of the canonical JSON form, used as the ledger payload
    pub fn data_hash(&self) -> String {
        // Field order is fixed by the struct definition, so the JSON form is stable.
        let payload = serde_json::to_vec(self).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(&payload);
        format!("{:x}", hasher.finalize())
    }

    /// Check a previously recorded hash against this event's content
    pub fn verify_hash(&self, stored_hash: &str) -> bool {
        self.data_hash().eq_ignore_ascii_case(stored_hash)
    }
}

/// Result reported by the audit notifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReceipt {
    pub transaction_id: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Advisory outcome of the best-effort audit call attached to operation responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AuditStatus {
    Recorded { transaction_id: String },
    Skipped,
    Degraded { reason: String },
}

impl AuditStatus {
    pub fn is_degraded(&self) -> bool {
        matches!(self, AuditStatus::Degraded { .. })
    }

    pub fn transaction_id(&self) -> Option<&str> {
        match self {
            AuditStatus::Recorded { transaction_id } => Some(transaction_id),
            _ => None,
        }
    }
}

/// Connection state of the audit notifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditConnection {
    pub connected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}
