use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::WorkerId;

/// Unique identifier for an expense entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(pub Uuid);

impl ExpenseId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ExpenseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseKind {
    Mileage,
    Meal,
    Accommodation,
    Other,
}

/// Approval state of an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseStatus {
    Pending,
    Approved,
    Rejected,
}

/// Reimbursable expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseEntry {
    pub id: ExpenseId,
    pub worker_id: WorkerId,
    pub date: DateTime<Utc>,
    pub kind: ExpenseKind,

    /// Amount in currency units, rounded to cents
    pub amount: f64,

    pub description: String,

    /// Straight-line distance in meters (mileage only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_m: Option<f64>,

    pub status: ExpenseStatus,
}
