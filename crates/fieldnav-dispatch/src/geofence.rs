//! Geofence attendance state machine.
//!
//! Each (worker, site) pair is OUTSIDE while no active check-in exists and INSIDE
//! while one does. Every evaluation checks every registered site independently, so
//! a single update may exit one site and enter another.

use chrono::{DateTime, Utc};
use fieldnav_core::config::DispatchConfig;
use fieldnav_core::error::Result;
use fieldnav_core::models::{
    ActiveCheckIn, Coordinates, ExpenseEntry, ExpenseId, ExpenseKind, ExpenseStatus, GeofenceEvent,
    GeofenceEventKind, JobSite, TimesheetEntry, WorkerId,
};
use fieldnav_geo::{haversine_distance, membership};
use fieldnav_store::Stores;

use crate::ledger::round2;

/// Everything one evaluation changed
#[derive(Debug, Clone, Default)]
pub struct EvaluationOutcome {
    /// Emitted events, in site order
    pub events: Vec<GeofenceEvent>,

    /// Sites the worker entered or exited, parallel to `events`
    pub sites: Vec<JobSite>,

    /// Timesheet entries opened by `enter` events
    pub opened: Vec<TimesheetEntry>,

    /// Timesheet entries closed by `exit` events
    pub closed: Vec<TimesheetEntry>,

    /// Mileage expenses booked on exit
    pub expenses: Vec<ExpenseEntry>,
}

/// Applies enter/exit transitions to the attendance and expense ledgers.
///
/// The engine does not lock; callers serialize evaluations through the dispatch
/// commit lock.
#[derive(Clone)]
pub struct GeofenceEngine {
    stores: Stores,
    mileage_rate_per_km: f64,
    mileage_threshold_m: f64,
}

impl GeofenceEngine {
    pub fn new(stores: Stores, config: &DispatchConfig) -> Self {
        Self {
            stores,
            mileage_rate_per_km: config.mileage_rate_per_km,
            mileage_threshold_m: config.mileage_threshold_m,
        }
    }

    /// Evaluate a new position of `worker_id` against every registered site
    pub async fn evaluate(
        &self,
        worker_id: &WorkerId,
        location: Coordinates,
        now: DateTime<Utc>,
    ) -> Result<EvaluationOutcome> {
        let sites = self.stores.sites.list_sites().await?;
        let mut outcome = EvaluationOutcome::default();

        for m in membership(&location, &sites) {
            let site = m.site;
            let check_in = self.stores.attendance.get_check_in(worker_id, site.id).await?;

            tracing::debug!(
                worker_id = %worker_id,
                site_id = %site.id,
                distance_m = m.distance_m,
                inside = m.inside,
                checked_in = check_in.is_some(),
                "Evaluated geofence"
            );

            let kind = match (check_in.is_some(), m.inside) {
                (false, true) => {
                    self.enter(worker_id, site, location, now, &mut outcome).await?;
                    GeofenceEventKind::Enter
                }
                (true, false) => {
                    self.exit(worker_id, site, location, now, &mut outcome).await?;
                    GeofenceEventKind::Exit
                }
                _ => continue,
            };

            let event = GeofenceEvent {
                kind,
                geofence_id: site.geofence.id,
                site_id: site.id,
                worker_id: worker_id.clone(),
                timestamp: now,
                location,
            };
            self.stores.tracking.append_event(event.clone()).await?;
            outcome.events.push(event);
            outcome.sites.push(site.clone());
        }

        Ok(outcome)
    }

    async fn enter(
        &self,
        worker_id: &WorkerId,
        site: &JobSite,
        location: Coordinates,
        now: DateTime<Utc>,
        outcome: &mut EvaluationOutcome,
    ) -> Result<()> {
        self.stores
            .attendance
            .insert_check_in(ActiveCheckIn {
                worker_id: worker_id.clone(),
                site_id: site.id,
                check_in_time: now,
                location,
            })
            .await?;

        let entry = TimesheetEntry::open(worker_id.clone(), site.id, now, location);
        self.stores.attendance.insert_timesheet(entry.clone()).await?;

        tracing::info!(worker_id = %worker_id, site_id = %site.id, "Worker entered geofence");
        outcome.opened.push(entry);
        Ok(())
    }

    async fn exit(
        &self,
        worker_id: &WorkerId,
        site: &JobSite,
        location: Coordinates,
        now: DateTime<Utc>,
        outcome: &mut EvaluationOutcome,
    ) -> Result<()> {
        if let Some(mut entry) = self.stores.attendance.active_timesheet(worker_id, site.id).await? {
            entry.close(now, location);
            self.stores.attendance.save_timesheet(&entry).await?;

            let traveled_m = haversine_distance(&entry.check_in_location, &location);
            if let Some(expense) = self.mileage_expense(worker_id, traveled_m, now) {
                self.stores.expenses.insert_expense(expense.clone()).await?;
                outcome.expenses.push(expense);
            }
            outcome.closed.push(entry);
        } else {
            tracing::warn!(
                worker_id = %worker_id,
                site_id = %site.id,
                "Check-in without an active timesheet entry"
            );
        }

        self.stores.attendance.remove_check_in(worker_id, site.id).await?;

        tracing::info!(worker_id = %worker_id, site_id = %site.id, "Worker exited geofence");
        Ok(())
    }

    /// Mileage is booked only when check-in and check-out are more than the threshold apart
    fn mileage_expense(
        &self,
        worker_id: &WorkerId,
        traveled_m: f64,
        now: DateTime<Utc>,
    ) -> Option<ExpenseEntry> {
        if traveled_m.is_nan() || traveled_m <= self.mileage_threshold_m {
            return None;
        }

        let km = traveled_m / 1000.0;
        Some(ExpenseEntry {
            id: ExpenseId::new(),
            worker_id: worker_id.clone(),
            date: now,
            kind: ExpenseKind::Mileage,
            amount: round2(km * self.mileage_rate_per_km),
            description: format!("Travel between job sites - {:.2} km", km),
            distance_m: Some(traveled_m),
            status: ExpenseStatus::Pending,
        })
    }
}
