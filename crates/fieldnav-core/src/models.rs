pub mod attendance;
pub mod audit;
pub mod coordinates;
pub mod expense;
pub mod job;
pub mod notification;
pub mod site;
pub mod worker;

pub use attendance::{
    ActiveCheckIn, DailyTimesheet, GeofenceEvent, GeofenceEventKind, LocationUpdate,
    TimesheetEntry, TimesheetId, TimesheetStatus, TimesheetSummaryRow,
};
pub use audit::{AuditConnection, AuditEvent, AuditEventKind, AuditReceipt, AuditStatus};
pub use coordinates::Coordinates;
pub use expense::{ExpenseEntry, ExpenseId, ExpenseKind, ExpenseStatus};
pub use job::{Job, JobId, JobPriority, JobStatus, NewJob};
pub use notification::{
    NewNotification, Notification, NotificationData, NotificationId, NotificationKind,
};
pub use site::{Geofence, GeofenceId, JobSite, NewJobSite, SiteId};
pub use worker::{Worker, WorkerId, WorkerStatus, WorkerSummary};
