use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fieldnav_core::error::Result;
use fieldnav_core::models::{
    ActiveCheckIn, Coordinates, ExpenseEntry, ExpenseId, ExpenseStatus, GeofenceEvent, Job,
    JobId, JobSite, JobStatus, LocationUpdate, NewJob, NewJobSite, Notification,
    NotificationId, SiteId, TimesheetEntry, Worker, WorkerId, WorkerStatus,
};
use std::sync::Arc;

/// Port for the worker directory
#[async_trait]
pub trait WorkerStore: Send + Sync {
    /// List all workers in registration order
    async fn list_workers(&self) -> Result<Vec<Worker>>;

    /// Get a worker by ID
    async fn get_worker(&self, id: &WorkerId) -> Result<Option<Worker>>;

    /// Register a worker, replacing any previous record with the same ID
    async fn insert_worker(&self, worker: Worker) -> Result<()>;

    /// Update a worker's availability; fails with NotFound for unknown workers
    async fn set_status(&self, id: &WorkerId, status: WorkerStatus) -> Result<()>;

    /// Update a worker's last known position; fails with NotFound for unknown workers
    async fn set_location(&self, id: &WorkerId, location: Coordinates) -> Result<()>;
}

/// Port for the job directory
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Create a pending job; IDs are monotonic and never reused
    async fn create_job(&self, job: NewJob, created_at: DateTime<Utc>) -> Result<Job>;

    async fn get_job(&self, id: JobId) -> Result<Option<Job>>;

    /// List all jobs in creation order
    async fn list_jobs(&self) -> Result<Vec<Job>>;

    async fn list_jobs_by_status(&self, status: JobStatus) -> Result<Vec<Job>>;

    /// Jobs assigned to a worker, optionally narrowed to one status
    async fn list_jobs_by_worker(
        &self,
        worker_id: &WorkerId,
        status: Option<JobStatus>,
    ) -> Result<Vec<Job>>;

    /// Overwrite an existing job; fails with NotFound if it was never created
    async fn save_job(&self, job: &Job) -> Result<()>;
}

/// Port for the job-site registry
#[async_trait]
pub trait SiteStore: Send + Sync {
    /// Register a site and its geofence, allocating both IDs
    async fn register_site(&self, site: NewJobSite, default_radius_m: f64) -> Result<JobSite>;

    async fn get_site(&self, id: SiteId) -> Result<Option<JobSite>>;

    /// List all sites in registration order
    async fn list_sites(&self) -> Result<Vec<JobSite>>;
}

/// Port for the active check-in set and the timesheet ledger
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    async fn get_check_in(&self, worker_id: &WorkerId, site_id: SiteId)
        -> Result<Option<ActiveCheckIn>>;

    /// Insert a check-in; at most one exists per (worker, site)
    async fn insert_check_in(&self, check_in: ActiveCheckIn) -> Result<()>;

    async fn remove_check_in(
        &self,
        worker_id: &WorkerId,
        site_id: SiteId,
    ) -> Result<Option<ActiveCheckIn>>;

    async fn check_ins_for_worker(&self, worker_id: &WorkerId) -> Result<Vec<ActiveCheckIn>>;

    async fn insert_timesheet(&self, entry: TimesheetEntry) -> Result<()>;

    /// Most recently opened active timesheet entry for a (worker, site) pair
    async fn active_timesheet(
        &self,
        worker_id: &WorkerId,
        site_id: SiteId,
    ) -> Result<Option<TimesheetEntry>>;

    /// Overwrite an existing timesheet entry; fails with NotFound if absent
    async fn save_timesheet(&self, entry: &TimesheetEntry) -> Result<()>;

    async fn timesheets_for_worker(&self, worker_id: &WorkerId) -> Result<Vec<TimesheetEntry>>;

    /// Every timesheet entry in insertion order
    async fn list_timesheets(&self) -> Result<Vec<TimesheetEntry>>;
}

/// Port for append-only tracking logs: location history and geofence events
#[async_trait]
pub trait TrackingStore: Send + Sync {
    async fn append_location(&self, update: LocationUpdate) -> Result<()>;

    async fn location_history(&self, worker_id: &WorkerId) -> Result<Vec<LocationUpdate>>;

    async fn append_event(&self, event: GeofenceEvent) -> Result<()>;

    async fn events_for_worker(&self, worker_id: &WorkerId) -> Result<Vec<GeofenceEvent>>;
}

/// Port for the expense ledger
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    async fn insert_expense(&self, expense: ExpenseEntry) -> Result<()>;

    async fn get_expense(&self, id: ExpenseId) -> Result<Option<ExpenseEntry>>;

    async fn expenses_for_worker(&self, worker_id: &WorkerId) -> Result<Vec<ExpenseEntry>>;

    /// Update an expense's review status; fails with NotFound if absent
    async fn set_expense_status(&self, id: ExpenseId, status: ExpenseStatus)
        -> Result<ExpenseEntry>;
}

/// Port for the notification inbox
#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn insert_notification(&self, notification: Notification) -> Result<()>;

    /// Notifications addressed to a user in insertion order
    async fn notifications_for_user(&self, user_id: &str) -> Result<Vec<Notification>>;

    /// Mark one notification read; fails with NotFound if absent
    async fn mark_read(&self, id: NotificationId) -> Result<Notification>;

    /// Mark every unread notification of a user read, returning how many changed
    async fn mark_all_read(&self, user_id: &str) -> Result<usize>;

    async fn unread_count(&self, user_id: &str) -> Result<usize>;
}

/// Bundle of every directory port, shared by the dispatch services
#[derive(Clone)]
pub struct Stores {
    pub workers: Arc<dyn WorkerStore>,
    pub jobs: Arc<dyn JobStore>,
    pub sites: Arc<dyn SiteStore>,
    pub attendance: Arc<dyn AttendanceStore>,
    pub tracking: Arc<dyn TrackingStore>,
    pub expenses: Arc<dyn ExpenseStore>,
    pub notifications: Arc<dyn NotificationStore>,
}
