use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::{Coordinates, GeofenceId, SiteId, WorkerId};

/// Record that a worker is currently inside a site's geofence.
///
/// At most one exists per (worker, site) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveCheckIn {
    pub worker_id: WorkerId,
    pub site_id: SiteId,
    pub check_in_time: DateTime<Utc>,
    pub location: Coordinates,
}

/// Unique identifier for a timesheet entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimesheetId(pub Uuid);

impl TimesheetId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TimesheetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TimesheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimesheetStatus {
    Active,
    Completed,
    Flagged,
}

/// One continuous presence interval at a job site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimesheetEntry {
    pub id: TimesheetId,
    pub worker_id: WorkerId,
    pub site_id: SiteId,
    pub check_in_time: DateTime<Utc>,
    pub check_in_location: Coordinates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out_location: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_hours: Option<f64>,
    pub status: TimesheetStatus,
}

impl TimesheetEntry {
    /// Open an active entry at check-in
    pub fn open(worker_id: WorkerId, site_id: SiteId, at: DateTime<Utc>, location: Coordinates) -> Self {
        Self {
            id: TimesheetId::new(),
            worker_id,
            site_id,
            check_in_time: at,
            check_in_location: location,
            check_out_time: None,
            check_out_location: None,
            total_hours: None,
            status: TimesheetStatus::Active,
        }
    }

    /// Close the entry at check-out, recording the elapsed hours.
    ///
    /// A check-out stamped before the check-in books zero hours and flags the entry.
    pub fn close(&mut self, at: DateTime<Utc>, location: Coordinates) {
        let elapsed_ms = (at - self.check_in_time).num_milliseconds();
        self.check_out_time = Some(at);
        self.check_out_location = Some(location);
        if elapsed_ms < 0 {
            self.total_hours = Some(0.0);
            self.status = TimesheetStatus::Flagged;
        } else {
            self.total_hours = Some(elapsed_ms as f64 / 3_600_000.0);
            self.status = TimesheetStatus::Completed;
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == TimesheetStatus::Active
    }

    /// Calendar day (UTC) the entry is booked on
    pub fn work_date(&self) -> NaiveDate {
        self.check_in_time.date_naive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeofenceEventKind {
    Enter,
    Exit,
}

/// Detected geofence boundary crossing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeofenceEvent {
    #[serde(rename = "type")]
    pub kind: GeofenceEventKind,
    pub geofence_id: GeofenceId,
    pub site_id: SiteId,
    pub worker_id: WorkerId,
    pub timestamp: DateTime<Utc>,
    pub location: Coordinates,
}

/// Immutable position report from a worker's device
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationUpdate {
    pub worker_id: WorkerId,
    pub coordinates: Coordinates,
    pub timestamp: DateTime<Utc>,

    /// Reported horizontal accuracy in meters
    pub accuracy_m: f64,
}

impl LocationUpdate {
    pub const DEFAULT_ACCURACY_M: f64 = 10.0;
}

/// Attendance and expense totals for one worker on one day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyTimesheet {
    pub worker_id: WorkerId,
    pub date: NaiveDate,
    pub entries: Vec<TimesheetEntry>,
    pub total_hours: f64,
    pub total_distance_km: f64,
    pub total_expenses: f64,
}

/// Timesheet entries grouped by worker and day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimesheetSummaryRow {
    pub worker_id: WorkerId,
    pub worker_name: String,
    pub date: NaiveDate,
    pub entries: Vec<TimesheetEntry>,
    pub total_hours: f64,
}
