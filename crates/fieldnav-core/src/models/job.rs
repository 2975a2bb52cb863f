use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Coordinates, WorkerId};

/// Unique identifier for a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub u64);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Job lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Assigned,
    InProgress,
    Completed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Assigned => "assigned",
            JobStatus::InProgress => "in_progress",
            JobStatus::Completed => "completed",
        }
    }

    /// States reachable from this one through an explicit status change.
    ///
    /// `Assigned -> Pending` is the unassign transition.
    pub fn allowed_transitions(&self) -> &'static [JobStatus] {
        match self {
            JobStatus::Pending => &[JobStatus::Assigned],
            JobStatus::Assigned => &[JobStatus::InProgress, JobStatus::Pending],
            JobStatus::InProgress => &[JobStatus::Completed],
            JobStatus::Completed => &[],
        }
    }

    pub fn can_transition_to(&self, next: JobStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    /// Whether a job in this state carries an assigned worker
    pub fn has_assignee(&self) -> bool {
        !matches!(self, JobStatus::Pending)
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_transitions().is_empty()
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

/// A unit of field work at a location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Unique identifier
    pub id: JobId,

    pub title: String,
    pub description: String,

    /// Where the work happens
    pub location: Coordinates,

    /// Worker holding the job; present for assigned, in-progress and completed jobs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_worker_id: Option<WorkerId>,

    pub status: JobStatus,
    pub priority: JobPriority,

    /// Expected time on site
    pub estimated_duration_minutes: u32,

    pub created_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<DateTime<Utc>>,
}

impl Job {
    /// Build a pending job from creation fields
    pub fn from_new(id: JobId, new: NewJob, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            location: new.location,
            assigned_worker_id: None,
            status: JobStatus::Pending,
            priority: new.priority.unwrap_or_default(),
            estimated_duration_minutes: new
                .estimated_duration_minutes
                .unwrap_or(NewJob::DEFAULT_DURATION_MINUTES),
            created_at,
            scheduled_for: new.scheduled_for,
        }
    }
}

/// Fields supplied when creating a job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub location: Coordinates,
    #[serde(default)]
    pub priority: Option<JobPriority>,
    #[serde(default)]
    pub estimated_duration_minutes: Option<u32>,
    #[serde(default)]
    pub scheduled_for: Option<DateTime<Utc>>,
}

impl NewJob {
    pub const DEFAULT_DURATION_MINUTES: u32 = 60;

    pub fn new(title: impl Into<String>, location: Coordinates) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            location,
            priority: None,
            estimated_duration_minutes: None,
            scheduled_for: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_table() {
        use JobStatus::*;
        let all = [Pending, Assigned, InProgress, Completed];
        let allowed = [
            (Pending, Assigned),
            (Assigned, InProgress),
            (Assigned, Pending),
            (InProgress, Completed),
        ];

        for from in all {
            for to in all {
                assert_eq!(
                    from.can_transition_to(to),
                    allowed.contains(&(from, to)),
                    "{} -> {}",
                    from,
                    to
                );
            }
        }
        assert!(Completed.is_terminal());
    }

    #[test]
    fn test_only_pending_has_no_assignee() {
        assert!(!JobStatus::Pending.has_assignee());
        assert!(JobStatus::Assigned.has_assignee());
        assert!(JobStatus::InProgress.has_assignee());
        assert!(JobStatus::Completed.has_assignee());
    }

    #[test]
    fn test_new_job_defaults() {
        let new = NewJob::new("Meter check", Coordinates::new(28.6, 77.2));
        let job = Job::from_new(JobId(7), new, Utc::now());

        assert_eq!(job.status, JobStatus::Pending);
        assert_eq!(job.priority, JobPriority::Medium);
        assert_eq!(job.estimated_duration_minutes, 60);
        assert!(job.assigned_worker_id.is_none());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&JobStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }
}
