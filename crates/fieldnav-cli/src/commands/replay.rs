//! Replay command implementation

use crate::cli::{Cli, ReplayArgs};
use crate::context::dispatch_service;
use crate::output::OutputWriter;
use crate::output_types::{EventRow, ExpenseRow, ReplayOutput, TimesheetRow};
use crate::track::{read_gpx, track_fixes};
use anyhow::{bail, Context, Result};
use chrono::{Duration, Utc};
use fieldnav_core::error::FieldnavError;
use fieldnav_core::models::WorkerId;

pub async fn execute(cli: &Cli, args: &ReplayArgs, output: &OutputWriter) -> Result<()> {
    let dispatch = dispatch_service(cli).await?;
    let worker_id = WorkerId::new(args.worker.clone());
    let worker = dispatch
        .get_worker(&worker_id)
        .await
        .with_context(|| format!("Unknown worker {}", worker_id))?;

    let gpx = read_gpx(&args.path)?;
    let fixes = track_fixes(&gpx, Utc::now(), Duration::seconds(i64::from(args.interval_secs)));
    if fixes.is_empty() {
        bail!("No track points or waypoints in {}", args.path.display());
    }

    output.info(format!(
        "Replaying {} points for {} ({})",
        fixes.len(),
        worker.display_name(),
        worker_id
    ));

    let mut events = Vec::new();
    let mut degraded_audits = 0;
    let mut skipped = 0;
    for fix in &fixes {
        let outcome = match dispatch
            .record_location_at(&worker_id, fix.coordinates, None, fix.timestamp)
            .await
        {
            Ok(outcome) => outcome,
            Err(FieldnavError::InvalidInput { ref field, ref reason }) if field == "timestamp" => {
                tracing::warn!(
                    at = %fix.timestamp,
                    location = %fix.coordinates,
                    "Skipping fix: {}",
                    reason
                );
                skipped += 1;
                continue;
            }
            Err(err) => {
                return Err(anyhow::Error::new(err)
                    .context(format!("Failed to record fix at {}", fix.coordinates)));
            }
        };
        tracing::debug!(
            at = %fix.timestamp,
            location = %fix.coordinates,
            events = outcome.geofence_events.len(),
            "Replayed fix"
        );

        degraded_audits += outcome
            .auto_check_in
            .iter()
            .chain(outcome.auto_check_out.iter())
            .filter(|visit| visit.audit.is_degraded())
            .count();
        events.extend(outcome.geofence_events);
    }

    let timesheets = dispatch.timesheets(&worker_id, None).await?;
    let expenses = dispatch.expenses(&worker_id, None, None).await?;

    if output.is_json() {
        return output.result(ReplayOutput {
            worker_id,
            points: fixes.len(),
            skipped,
            events,
            timesheets,
            expenses,
            degraded_audits,
        });
    }

    output.section("Geofence events");
    output.table(events.iter().map(EventRow::from).collect());

    output.section("Timesheets");
    output.table(timesheets.iter().map(TimesheetRow::from).collect());

    output.section("Expenses");
    output.table(expenses.iter().map(ExpenseRow::from).collect());

    if skipped > 0 {
        output.warning(format!("{} fixes were older than the previous one and were skipped", skipped));
    }
    if degraded_audits > 0 {
        output.warning(format!("{} audit calls did not reach the ledger", degraded_audits));
    }
    output.success(format!(
        "Replayed {} points: {} events, {} timesheets, {} expenses",
        fixes.len(),
        events.len(),
        timesheets.len(),
        expenses.len()
    ));

    Ok(())
}
