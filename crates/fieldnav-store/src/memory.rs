//! In-memory storage implementations.
//!
//! These implementations use `RwLock::unwrap()` intentionally. Lock poisoning
//! only occurs when another thread panicked while holding the lock, which is
//! an unrecoverable state.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fieldnav_core::error::{FieldnavError, Result};
use fieldnav_core::models::{
    ActiveCheckIn, Coordinates, ExpenseEntry, ExpenseId, ExpenseStatus, GeofenceEvent,
    GeofenceId, Job, JobId, JobSite, JobStatus, LocationUpdate, NewJob, NewJobSite,
    Notification, NotificationId, SiteId, TimesheetEntry, Worker, WorkerId, WorkerStatus,
};
use fieldnav_geo::validate_radius;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use crate::ports::{
    AttendanceStore, ExpenseStore, JobStore, NotificationStore, SiteStore, Stores,
    TrackingStore, WorkerStore,
};

impl Stores {
    /// Wire every port to a fresh in-memory adapter
    pub fn in_memory() -> Self {
        Self {
            workers: Arc::new(MemoryWorkerStore::new()),
            jobs: Arc::new(MemoryJobStore::new()),
            sites: Arc::new(MemorySiteStore::new()),
            attendance: Arc::new(MemoryAttendanceStore::new()),
            tracking: Arc::new(MemoryTrackingStore::new()),
            expenses: Arc::new(MemoryExpenseStore::new()),
            notifications: Arc::new(MemoryNotificationStore::new()),
        }
    }
}

#[derive(Debug, Default)]
struct WorkerDirectory {
    by_id: HashMap<WorkerId, Worker>,
    order: Vec<WorkerId>,
}

/// In-memory implementation of WorkerStore
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkerStore {
    directory: Arc<RwLock<WorkerDirectory>>,
}

impl MemoryWorkerStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn update<F>(&self, id: &WorkerId, apply: F) -> Result<()>
    where
        F: FnOnce(&mut Worker),
    {
        let mut directory = self.directory.write().unwrap();
        let worker = directory
            .by_id
            .get_mut(id)
            .ok_or_else(|| FieldnavError::not_found("Worker", id))?;
        apply(worker);
        Ok(())
    }
}

#[async_trait]
impl WorkerStore for MemoryWorkerStore {
    async fn list_workers(&self) -> Result<Vec<Worker>> {
        let directory = self.directory.read().unwrap();
        Ok(directory
            .order
            .iter()
            .filter_map(|id| directory.by_id.get(id).cloned())
            .collect())
    }

    async fn get_worker(&self, id: &WorkerId) -> Result<Option<Worker>> {
        let directory = self.directory.read().unwrap();
        Ok(directory.by_id.get(id).cloned())
    }

    async fn insert_worker(&self, worker: Worker) -> Result<()> {
        let mut directory = self.directory.write().unwrap();
        if !directory.by_id.contains_key(&worker.id) {
            directory.order.push(worker.id.clone());
        }
        directory.by_id.insert(worker.id.clone(), worker);
        Ok(())
    }

    async fn set_status(&self, id: &WorkerId, status: WorkerStatus) -> Result<()> {
        self.update(id, |worker| worker.current_status = status)
    }

    async fn set_location(&self, id: &WorkerId, location: Coordinates) -> Result<()> {
        self.update(id, |worker| worker.current_location = Some(location))
    }
}

/// In-memory implementation of JobStore
#[derive(Debug, Clone, Default)]
pub struct MemoryJobStore {
    jobs: Arc<RwLock<BTreeMap<JobId, Job>>>,
    next_id: Arc<RwLock<u64>>,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn create_job(&self, job: NewJob, created_at: DateTime<Utc>) -> Result<Job> {
        let mut jobs = self.jobs.write().unwrap();
        let mut next_id = self.next_id.write().unwrap();

        *next_id += 1;
        let job = Job::from_new(JobId(*next_id), job, created_at);

        jobs.insert(job.id, job.clone());
        Ok(job)
    }

    async fn get_job(&self, id: JobId) -> Result<Option<Job>> {
        let jobs = self.jobs.read().unwrap();
        Ok(jobs.get(&id).cloned())
    }

    async fn list_jobs(&self) -> Result<Vec<Job>> {
        let jobs = self.jobs.read().unwrap();
        Ok(jobs.values().cloned().collect())
    }

    async fn list_jobs_by_status(&self, status: JobStatus) -> Result<Vec<Job>> {
        let jobs = self.jobs.read().unwrap();
        Ok(jobs.values().filter(|job| job.status == status).cloned().collect())
    }

    async fn list_jobs_by_worker(
        &self,
        worker_id: &WorkerId,
        status: Option<JobStatus>,
    ) -> Result<Vec<Job>> {
        let jobs = self.jobs.read().unwrap();
        Ok(jobs
            .values()
            .filter(|job| job.assigned_worker_id.as_ref() == Some(worker_id))
            .filter(|job| status.map_or(true, |s| job.status == s))
            .cloned()
            .collect())
    }

    async fn save_job(&self, job: &Job) -> Result<()> {
        let mut jobs = self.jobs.write().unwrap();
        match jobs.get_mut(&job.id) {
            Some(existing) => {
                *existing = job.clone();
                Ok(())
            }
            None => Err(FieldnavError::not_found("Job", job.id)),
        }
    }
}

/// In-memory implementation of SiteStore
#[derive(Debug, Clone, Default)]
pub struct MemorySiteStore {
    sites: Arc<RwLock<BTreeMap<SiteId, JobSite>>>,
    next_site_id: Arc<RwLock<u64>>,
    next_geofence_id: Arc<RwLock<u64>>,
}

impl MemorySiteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SiteStore for MemorySiteStore {
    async fn register_site(&self, site: NewJobSite, default_radius_m: f64) -> Result<JobSite> {
        validate_radius(site.geofence_radius_m.unwrap_or(default_radius_m))?;

        let mut sites = self.sites.write().unwrap();
        let mut next_site_id = self.next_site_id.write().unwrap();
        let mut next_geofence_id = self.next_geofence_id.write().unwrap();

        *next_site_id += 1;
        *next_geofence_id += 1;
        let site = JobSite::from_new(
            SiteId(*next_site_id),
            GeofenceId(*next_geofence_id),
            site,
            default_radius_m,
        );

        sites.insert(site.id, site.clone());
        Ok(site)
    }

    async fn get_site(&self, id: SiteId) -> Result<Option<JobSite>> {
        let sites = self.sites.read().unwrap();
        Ok(sites.get(&id).cloned())
    }

    async fn list_sites(&self) -> Result<Vec<JobSite>> {
        let sites = self.sites.read().unwrap();
        Ok(sites.values().cloned().collect())
    }
}

/// In-memory implementation of AttendanceStore
#[derive(Debug, Clone, Default)]
pub struct MemoryAttendanceStore {
    check_ins: Arc<RwLock<HashMap<(WorkerId, SiteId), ActiveCheckIn>>>,
    timesheets: Arc<RwLock<Vec<TimesheetEntry>>>,
}

impl MemoryAttendanceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttendanceStore for MemoryAttendanceStore {
    async fn get_check_in(
        &self,
        worker_id: &WorkerId,
        site_id: SiteId,
    ) -> Result<Option<ActiveCheckIn>> {
        let check_ins = self.check_ins.read().unwrap();
        Ok(check_ins.get(&(worker_id.clone(), site_id)).cloned())
    }

    async fn insert_check_in(&self, check_in: ActiveCheckIn) -> Result<()> {
        let mut check_ins = self.check_ins.write().unwrap();
        let key = (check_in.worker_id.clone(), check_in.site_id);
        if check_ins.contains_key(&key) {
            return Err(FieldnavError::Storage(format!(
                "worker {} is already checked in at {}",
                check_in.worker_id, check_in.site_id
            )));
        }
        check_ins.insert(key, check_in);
        Ok(())
    }

    async fn remove_check_in(
        &self,
        worker_id: &WorkerId,
        site_id: SiteId,
    ) -> Result<Option<ActiveCheckIn>> {
        let mut check_ins = self.check_ins.write().unwrap();
        Ok(check_ins.remove(&(worker_id.clone(), site_id)))
    }

    async fn check_ins_for_worker(&self, worker_id: &WorkerId) -> Result<Vec<ActiveCheckIn>> {
        let check_ins = self.check_ins.read().unwrap();
        let mut result: Vec<ActiveCheckIn> = check_ins
            .values()
            .filter(|check_in| &check_in.worker_id == worker_id)
            .cloned()
            .collect();
        result.sort_by_key(|check_in| check_in.site_id);
        Ok(result)
    }

    async fn insert_timesheet(&self, entry: TimesheetEntry) -> Result<()> {
        let mut timesheets = self.timesheets.write().unwrap();
        timesheets.push(entry);
        Ok(())
    }

    async fn active_timesheet(
        &self,
        worker_id: &WorkerId,
        site_id: SiteId,
    ) -> Result<Option<TimesheetEntry>> {
        let timesheets = self.timesheets.read().unwrap();
        Ok(timesheets
            .iter()
            .rev()
            .find(|entry| {
                &entry.worker_id == worker_id && entry.site_id == site_id && entry.is_active()
            })
            .cloned())
    }

    async fn save_timesheet(&self, entry: &TimesheetEntry) -> Result<()> {
        let mut timesheets = self.timesheets.write().unwrap();
        match timesheets.iter_mut().find(|existing| existing.id == entry.id) {
            Some(existing) => {
                *existing = entry.clone();
                Ok(())
            }
            None => Err(FieldnavError::not_found("Timesheet", entry.id)),
        }
    }

    async fn timesheets_for_worker(&self, worker_id: &WorkerId) -> Result<Vec<TimesheetEntry>> {
        let timesheets = self.timesheets.read().unwrap();
        Ok(timesheets
            .iter()
            .filter(|entry| &entry.worker_id == worker_id)
            .cloned()
            .collect())
    }

    async fn list_timesheets(&self) -> Result<Vec<TimesheetEntry>> {
        let timesheets = self.timesheets.read().unwrap();
        Ok(timesheets.clone())
    }
}

/// In-memory implementation of TrackingStore
#[derive(Debug, Clone, Default)]
pub struct MemoryTrackingStore {
    locations: Arc<RwLock<Vec<LocationUpdate>>>,
    events: Arc<RwLock<Vec<GeofenceEvent>>>,
}

impl MemoryTrackingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TrackingStore for MemoryTrackingStore {
    async fn append_location(&self, update: LocationUpdate) -> Result<()> {
        self.locations.write().unwrap().push(update);
        Ok(())
    }

    async fn location_history(&self, worker_id: &WorkerId) -> Result<Vec<LocationUpdate>> {
        let locations = self.locations.read().unwrap();
        Ok(locations
            .iter()
            .filter(|update| &update.worker_id == worker_id)
            .cloned()
            .collect())
    }

    async fn append_event(&self, event: GeofenceEvent) -> Result<()> {
        self.events.write().unwrap().push(event);
        Ok(())
    }

    async fn events_for_worker(&self, worker_id: &WorkerId) -> Result<Vec<GeofenceEvent>> {
        let events = self.events.read().unwrap();
        Ok(events
            .iter()
            .filter(|event| &event.worker_id == worker_id)
            .cloned()
            .collect())
    }
}

/// In-memory implementation of ExpenseStore
#[derive(Debug, Clone, Default)]
pub struct MemoryExpenseStore {
    expenses: Arc<RwLock<Vec<ExpenseEntry>>>,
}

impl MemoryExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExpenseStore for MemoryExpenseStore {
    async fn insert_expense(&self, expense: ExpenseEntry) -> Result<()> {
        self.expenses.write().unwrap().push(expense);
        Ok(())
    }

    async fn get_expense(&self, id: ExpenseId) -> Result<Option<ExpenseEntry>> {
        let expenses = self.expenses.read().unwrap();
        Ok(expenses.iter().find(|expense| expense.id == id).cloned())
    }

    async fn expenses_for_worker(&self, worker_id: &WorkerId) -> Result<Vec<ExpenseEntry>> {
        let expenses = self.expenses.read().unwrap();
        Ok(expenses
            .iter()
            .filter(|expense| &expense.worker_id == worker_id)
            .cloned()
            .collect())
    }

    async fn set_expense_status(
        &self,
        id: ExpenseId,
        status: ExpenseStatus,
    ) -> Result<ExpenseEntry> {
        let mut expenses = self.expenses.write().unwrap();
        let expense = expenses
            .iter_mut()
            .find(|expense| expense.id == id)
            .ok_or_else(|| FieldnavError::not_found("Expense", id))?;
        expense.status = status;
        Ok(expense.clone())
    }
}

/// In-memory implementation of NotificationStore
#[derive(Debug, Clone, Default)]
pub struct MemoryNotificationStore {
    notifications: Arc<RwLock<Vec<Notification>>>,
}

impl MemoryNotificationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationStore for MemoryNotificationStore {
    async fn insert_notification(&self, notification: Notification) -> Result<()> {
        self.notifications.write().unwrap().push(notification);
        Ok(())
    }

    async fn notifications_for_user(&self, user_id: &str) -> Result<Vec<Notification>> {
        let notifications = self.notifications.read().unwrap();
        Ok(notifications
            .iter()
            .filter(|notification| notification.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn mark_read(&self, id: NotificationId) -> Result<Notification> {
        let mut notifications = self.notifications.write().unwrap();
        let notification = notifications
            .iter_mut()
            .find(|notification| notification.id == id)
            .ok_or_else(|| FieldnavError::not_found("Notification", id))?;
        notification.read = true;
        Ok(notification.clone())
    }

    async fn mark_all_read(&self, user_id: &str) -> Result<usize> {
        let mut notifications = self.notifications.write().unwrap();
        let mut changed = 0;
        for notification in notifications
            .iter_mut()
            .filter(|notification| notification.user_id == user_id && !notification.read)
        {
            notification.read = true;
            changed += 1;
        }
        Ok(changed)
    }

    async fn unread_count(&self, user_id: &str) -> Result<usize> {
        let notifications = self.notifications.read().unwrap();
        Ok(notifications
            .iter()
            .filter(|notification| notification.user_id == user_id && !notification.read)
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldnav_core::models::{NewNotification, NotificationKind};

    fn worker(id: &str) -> Worker {
        Worker {
            id: WorkerId::from(id),
            email: format!("{}@company.com", id),
            first_name: "Test".to_string(),
            last_name: id.to_string(),
            phone: String::new(),
            employee_id: format!("EMP{}", id),
            team_id: "team1".to_string(),
            current_status: WorkerStatus::Available,
            current_location: None,
        }
    }

    #[tokio::test]
    async fn test_workers_keep_registration_order() {
        let store = MemoryWorkerStore::new();
        for id in ["2", "10", "3"] {
            store.insert_worker(worker(id)).await.unwrap();
        }

        let ids: Vec<String> = store
            .list_workers()
            .await
            .unwrap()
            .into_iter()
            .map(|w| w.id.0)
            .collect();
        assert_eq!(ids, vec!["2", "10", "3"]);
    }

    #[tokio::test]
    async fn test_set_status_unknown_worker_is_not_found() {
        let store = MemoryWorkerStore::new();
        let err = store
            .set_status(&WorkerId::from("404"), WorkerStatus::Busy)
            .await
            .unwrap_err();
        assert!(matches!(err, FieldnavError::NotFound { entity: "Worker", .. }));
    }

    #[tokio::test]
    async fn test_job_ids_are_monotonic() {
        let store = MemoryJobStore::new();
        let here = Coordinates::new(28.6129, 77.2295);

        let first = store.create_job(NewJob::new("a", here), Utc::now()).await.unwrap();
        let second = store.create_job(NewJob::new("b", here), Utc::now()).await.unwrap();

        assert_eq!(first.id, JobId(1));
        assert_eq!(second.id, JobId(2));
        assert_eq!(first.status, JobStatus::Pending);
    }

    #[tokio::test]
    async fn test_save_unknown_job_fails() {
        let store = MemoryJobStore::new();
        let job = Job::from_new(JobId(9), NewJob::new("x", Coordinates::new(0.0, 0.0)), Utc::now());
        assert!(store.save_job(&job).await.is_err());
    }

    #[tokio::test]
    async fn test_list_jobs_by_worker_filters_status() {
        let store = MemoryJobStore::new();
        let here = Coordinates::new(28.6129, 77.2295);
        let w = WorkerId::from("2");

        let mut job = store.create_job(NewJob::new("a", here), Utc::now()).await.unwrap();
        job.assigned_worker_id = Some(w.clone());
        job.status = JobStatus::Assigned;
        store.save_job(&job).await.unwrap();
        store.create_job(NewJob::new("b", here), Utc::now()).await.unwrap();

        assert_eq!(store.list_jobs_by_worker(&w, None).await.unwrap().len(), 1);
        assert!(store
            .list_jobs_by_worker(&w, Some(JobStatus::Completed))
            .await
            .unwrap()
            .is_empty());
        assert_eq!(store.list_jobs_by_status(JobStatus::Pending).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_register_site_allocates_ids() {
        let store = MemorySiteStore::new();
        let site = store
            .register_site(
                NewJobSite {
                    name: "Gurgaon Substation".to_string(),
                    address: "Sector 29, Gurgaon".to_string(),
                    coordinates: Coordinates::new(28.7041, 77.1025),
                    geofence_radius_m: Some(150.0),
                },
                100.0,
            )
            .await
            .unwrap();

        assert_eq!(site.id, SiteId(1));
        assert_eq!(site.geofence.id, GeofenceId(1));
        assert_eq!(site.geofence.radius_m, 150.0);
    }

    #[tokio::test]
    async fn test_register_site_rejects_non_positive_default_radius() {
        let store = MemorySiteStore::new();
        let depot = NewJobSite {
            name: "Depot".to_string(),
            address: String::new(),
            coordinates: Coordinates::new(22.7196, 75.8577),
            geofence_radius_m: None,
        };

        let err = store.register_site(depot.clone(), -50.0).await.unwrap_err();
        assert!(matches!(err, FieldnavError::InvalidInput { .. }));
        assert!(store.list_sites().await.unwrap().is_empty());

        // Rejected registrations do not consume IDs
        let site = store.register_site(depot, 100.0).await.unwrap();
        assert_eq!(site.id, SiteId(1));
    }

    #[tokio::test]
    async fn test_duplicate_check_in_is_rejected() {
        let store = MemoryAttendanceStore::new();
        let check_in = ActiveCheckIn {
            worker_id: WorkerId::from("2"),
            site_id: SiteId(1),
            check_in_time: Utc::now(),
            location: Coordinates::new(22.7196, 75.8577),
        };

        store.insert_check_in(check_in.clone()).await.unwrap();
        assert!(store.insert_check_in(check_in).await.is_err());

        let removed = store.remove_check_in(&WorkerId::from("2"), SiteId(1)).await.unwrap();
        assert!(removed.is_some());
        assert!(store.check_ins_for_worker(&WorkerId::from("2")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_active_timesheet_is_most_recent() {
        let store = MemoryAttendanceStore::new();
        let w = WorkerId::from("2");
        let here = Coordinates::new(22.7196, 75.8577);
        let now = Utc::now();

        let older = TimesheetEntry::open(w.clone(), SiteId(1), now, here);
        let newer = TimesheetEntry::open(w.clone(), SiteId(1), now, here);
        store.insert_timesheet(older).await.unwrap();
        store.insert_timesheet(newer.clone()).await.unwrap();

        let active = store.active_timesheet(&w, SiteId(1)).await.unwrap().unwrap();
        assert_eq!(active.id, newer.id);
        assert!(store.active_timesheet(&w, SiteId(2)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mark_all_read_counts_changes() {
        let store = MemoryNotificationStore::new();
        for title in ["one", "two"] {
            let n = NewNotification::new("2", NotificationKind::System, title, "")
                .into_notification(Utc::now());
            store.insert_notification(n).await.unwrap();
        }
        let other = NewNotification::new("3", NotificationKind::System, "x", "")
            .into_notification(Utc::now());
        store.insert_notification(other).await.unwrap();

        assert_eq!(store.unread_count("2").await.unwrap(), 2);
        assert_eq!(store.mark_all_read("2").await.unwrap(), 2);
        assert_eq!(store.mark_all_read("2").await.unwrap(), 0);
        assert_eq!(store.unread_count("3").await.unwrap(), 1);
    }
}
