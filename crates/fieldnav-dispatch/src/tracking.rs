//! Location updates, automatic and manual attendance.

use chrono::{DateTime, Utc};
use fieldnav_core::error::{FieldnavError, Result};
use fieldnav_core::models::{
    AuditEvent, AuditEventKind, AuditStatus, Coordinates, GeofenceEvent, GeofenceEventKind, JobId,
    JobSite, LocationUpdate, NewNotification, NotificationData, NotificationKind, WorkerId,
    WorkerStatus,
};
use fieldnav_geo::validate_coordinates;

use crate::effects::SideEffect;
use crate::models::{CheckInStatus, CheckInView, LocationOutcome, ManualCheck, SiteVisit};
use crate::service::DispatchService;

impl DispatchService {
    /// Record a position report received now
    pub async fn record_location(
        &self,
        worker_id: &WorkerId,
        coordinates: Coordinates,
        accuracy_m: Option<f64>,
    ) -> Result<LocationOutcome> {
        self.record_fix(worker_id, coordinates, accuracy_m, None).await
    }

    /// Record a position report taken at `timestamp`.
    ///
    /// Appends to the location history, moves the worker, runs the geofence engine and
    /// flips the worker's status on enter (busy) and exit (available). Check-in and
    /// check-out notifications and audit calls run after the commit. A fix older than the
    /// worker's latest recorded one is rejected before anything changes.
    pub async fn record_location_at(
        &self,
        worker_id: &WorkerId,
        coordinates: Coordinates,
        accuracy_m: Option<f64>,
        timestamp: DateTime<Utc>,
    ) -> Result<LocationOutcome> {
        self.record_fix(worker_id, coordinates, accuracy_m, Some(timestamp)).await
    }

    /// Fixes are stamped with the commit time when no timestamp is given, so live reports
    /// stay in order under concurrency. A fix older than the worker's latest is rejected.
    async fn record_fix(
        &self,
        worker_id: &WorkerId,
        coordinates: Coordinates,
        accuracy_m: Option<f64>,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<LocationOutcome> {
        validate_coordinates(&coordinates)?;
        let accuracy_m = accuracy_m
            .filter(|a| a.is_finite() && *a >= 0.0)
            .unwrap_or(LocationUpdate::DEFAULT_ACCURACY_M);

        let (location_update, events, sites, outbox) = {
            let _commit = self.begin_commit().await;
            self.require_worker(worker_id).await?;

            let history = self.stores().tracking.location_history(worker_id).await?;
            let latest = history.iter().map(|update| update.timestamp).max();
            let now = Utc::now();
            let timestamp = timestamp.unwrap_or_else(|| latest.map_or(now, |l| l.max(now)));
            if let Some(latest) = latest {
                if timestamp < latest {
                    return Err(FieldnavError::invalid_input(
                        "timestamp",
                        format!("{} is earlier than the last recorded fix at {}", timestamp, latest),
                    ));
                }
            }

            let location_update = LocationUpdate {
                worker_id: worker_id.clone(),
                coordinates,
                timestamp,
                accuracy_m,
            };
            self.stores().tracking.append_location(location_update.clone()).await?;
            self.stores().workers.set_location(worker_id, coordinates).await?;

            let outcome = self.engine().evaluate(worker_id, coordinates, timestamp).await?;

            let mut outbox = Vec::new();
            for (event, site) in outcome.events.iter().zip(&outcome.sites) {
                let status = match event.kind {
                    GeofenceEventKind::Enter => WorkerStatus::Busy,
                    GeofenceEventKind::Exit => WorkerStatus::Available,
                };
                self.stores().workers.set_status(worker_id, status).await?;
                outbox.extend(visit_effects(event, site));
            }

            if !outcome.events.is_empty() {
                tracing::info!(
                    worker_id = %worker_id,
                    events = outcome.events.len(),
                    expenses = outcome.expenses.len(),
                    "Geofence transitions committed"
                );
            }
            (location_update, outcome.events, outcome.sites, outbox)
        };

        let audits = self.dispatch(outbox).await;

        let mut auto_check_in = None;
        let mut auto_check_out = None;
        for ((event, site), audit) in events.iter().zip(&sites).zip(audits) {
            let visit = SiteVisit {
                site_id: site.id,
                site_name: site.name.clone(),
                timestamp: event.timestamp,
                audit,
            };
            match event.kind {
                GeofenceEventKind::Enter => auto_check_in = Some(visit),
                GeofenceEventKind::Exit => auto_check_out = Some(visit),
            }
        }

        Ok(LocationOutcome {
            location_update,
            geofence_events: events,
            auto_check_in,
            auto_check_out,
        })
    }

    /// Check a worker in by hand; attendance ledgers are left untouched
    pub async fn manual_check_in(
        &self,
        worker_id: &WorkerId,
        location: Coordinates,
        job_id: Option<JobId>,
    ) -> Result<ManualCheck> {
        self.manual_check(worker_id, location, job_id, AuditEventKind::CheckIn).await
    }

    /// Check a worker out by hand; attendance ledgers are left untouched
    pub async fn manual_check_out(
        &self,
        worker_id: &WorkerId,
        location: Coordinates,
        job_id: Option<JobId>,
    ) -> Result<ManualCheck> {
        self.manual_check(worker_id, location, job_id, AuditEventKind::CheckOut).await
    }

    async fn manual_check(
        &self,
        worker_id: &WorkerId,
        location: Coordinates,
        job_id: Option<JobId>,
        kind: AuditEventKind,
    ) -> Result<ManualCheck> {
        validate_coordinates(&location)?;
        let status = match kind {
            AuditEventKind::CheckOut => WorkerStatus::Available,
            _ => WorkerStatus::Busy,
        };
        let timestamp = Utc::now();

        let event = {
            let _commit = self.begin_commit().await;
            self.require_worker(worker_id).await?;

            self.stores().workers.set_location(worker_id, location).await?;
            self.stores().workers.set_status(worker_id, status).await?;

            tracing::info!(worker_id = %worker_id, kind = ?kind, "Manual attendance recorded");

            let mut event =
                AuditEvent::new(worker_id.clone(), kind, timestamp).with_location(Some(location));
            if let Some(job_id) = job_id {
                event = event.with_job(job_id);
            }
            event
        };

        let audit = self
            .dispatch(vec![SideEffect::Audit(event)])
            .await
            .pop()
            .unwrap_or(AuditStatus::Skipped);

        Ok(ManualCheck {
            worker_id: worker_id.clone(),
            location,
            job_id,
            timestamp,
            audit,
        })
    }

    /// Immutable position history of a worker, oldest first
    pub async fn location_history(&self, worker_id: &WorkerId) -> Result<Vec<LocationUpdate>> {
        self.stores().tracking.location_history(worker_id).await
    }

    /// Geofence events of a worker, oldest first
    pub async fn geofence_events(&self, worker_id: &WorkerId) -> Result<Vec<GeofenceEvent>> {
        self.stores().tracking.events_for_worker(worker_id).await
    }

    pub async fn check_in_status(&self, worker_id: &WorkerId) -> Result<CheckInStatus> {
        let check_ins = self.stores().attendance.check_ins_for_worker(worker_id).await?;

        let mut active_check_ins = Vec::with_capacity(check_ins.len());
        for check_in in check_ins {
            let site_name = self
                .stores()
                .sites
                .get_site(check_in.site_id)
                .await?
                .map(|site| site.name);
            active_check_ins.push(CheckInView {
                site_id: check_in.site_id,
                site_name,
                check_in_time: check_in.check_in_time,
                location: check_in.location,
            });
        }

        Ok(CheckInStatus {
            worker_id: worker_id.clone(),
            is_checked_in: !active_check_ins.is_empty(),
            active_check_ins,
        })
    }
}

/// One notification and one audit call per geofence crossing, in that order
fn visit_effects(event: &GeofenceEvent, site: &JobSite) -> Vec<SideEffect> {
    let (notification_kind, audit_kind, title, message) = match event.kind {
        GeofenceEventKind::Enter => (
            NotificationKind::CheckIn,
            AuditEventKind::CheckIn,
            "Auto Check-In",
            format!("You have been automatically checked in at {}", site.name),
        ),
        GeofenceEventKind::Exit => (
            NotificationKind::CheckOut,
            AuditEventKind::CheckOut,
            "Auto Check-Out",
            format!("You have been automatically checked out from {}", site.name),
        ),
    };

    vec![
        SideEffect::Notify(
            NewNotification::new(event.worker_id.as_str(), notification_kind, title, message)
                .with_data(NotificationData::SiteVisit {
                    site_id: site.id,
                    site_name: site.name.clone(),
                    location: event.location,
                }),
        ),
        SideEffect::Audit(
            AuditEvent::new(event.worker_id.clone(), audit_kind, event.timestamp)
                .with_location(Some(event.location))
                .with_site(site.id),
        ),
    ]
}
