//! Timesheet and expense queries.

use chrono::NaiveDate;
use fieldnav_core::error::{FieldnavError, Result};
use fieldnav_core::models::{
    DailyTimesheet, ExpenseEntry, ExpenseId, ExpenseKind, ExpenseStatus, TimesheetEntry,
    TimesheetSummaryRow, Worker, WorkerId,
};
use std::collections::HashMap;

use crate::service::DispatchService;

/// Round half away from zero to two decimals
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Totals for one worker on one calendar day
pub fn daily_totals(
    worker_id: WorkerId,
    date: NaiveDate,
    timesheets: Vec<TimesheetEntry>,
    expenses: &[ExpenseEntry],
) -> DailyTimesheet {
    let entries: Vec<TimesheetEntry> =
        timesheets.into_iter().filter(|entry| entry.work_date() == date).collect();
    let day_expenses: Vec<&ExpenseEntry> =
        expenses.iter().filter(|expense| expense.date.date_naive() == date).collect();

    let total_hours: f64 = entries.iter().filter_map(|entry| entry.total_hours).sum();
    let total_distance_m: f64 = day_expenses
        .iter()
        .filter(|expense| expense.kind == ExpenseKind::Mileage)
        .filter_map(|expense| expense.distance_m)
        .sum();
    let total_expenses: f64 = day_expenses.iter().map(|expense| expense.amount).sum();

    DailyTimesheet {
        worker_id,
        date,
        entries,
        total_hours: round2(total_hours),
        total_distance_km: round2(total_distance_m / 1000.0),
        total_expenses: round2(total_expenses),
    }
}

/// Group timesheet entries by (worker, check-in date) in first-seen order.
///
/// The date range applies only when both bounds are given; both ends are inclusive.
pub fn summarize(
    timesheets: Vec<TimesheetEntry>,
    workers: &[Worker],
    range: Option<(NaiveDate, NaiveDate)>,
) -> Vec<TimesheetSummaryRow> {
    let names: HashMap<&WorkerId, String> =
        workers.iter().map(|worker| (&worker.id, worker.display_name())).collect();

    let mut rows: Vec<TimesheetSummaryRow> = Vec::new();
    let mut index: HashMap<(WorkerId, NaiveDate), usize> = HashMap::new();

    for entry in timesheets {
        let date = entry.work_date();
        if let Some((start, end)) = range {
            if date < start || date > end {
                continue;
            }
        }

        let key = (entry.worker_id.clone(), date);
        let position = *index.entry(key).or_insert_with(|| {
            rows.push(TimesheetSummaryRow {
                worker_id: entry.worker_id.clone(),
                worker_name: names
                    .get(&entry.worker_id)
                    .cloned()
                    .unwrap_or_else(|| "Unknown".to_string()),
                date,
                entries: Vec::new(),
                total_hours: 0.0,
            });
            rows.len() - 1
        });

        let row = &mut rows[position];
        row.total_hours += entry.total_hours.unwrap_or(0.0);
        row.entries.push(entry);
    }

    for row in &mut rows {
        row.total_hours = round2(row.total_hours);
    }
    rows
}

impl DispatchService {
    /// Timesheet entries of a worker, optionally limited to one check-in date
    pub async fn timesheets(
        &self,
        worker_id: &WorkerId,
        date: Option<NaiveDate>,
    ) -> Result<Vec<TimesheetEntry>> {
        let entries = self.stores().attendance.timesheets_for_worker(worker_id).await?;
        Ok(match date {
            Some(date) => entries.into_iter().filter(|entry| entry.work_date() == date).collect(),
            None => entries,
        })
    }

    pub async fn daily_timesheet(
        &self,
        worker_id: &WorkerId,
        date: NaiveDate,
    ) -> Result<DailyTimesheet> {
        let timesheets = self.stores().attendance.timesheets_for_worker(worker_id).await?;
        let expenses = self.stores().expenses.expenses_for_worker(worker_id).await?;
        Ok(daily_totals(worker_id.clone(), date, timesheets, &expenses))
    }

    pub async fn timesheet_summary(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<TimesheetSummaryRow>> {
        let timesheets = self.stores().attendance.list_timesheets().await?;
        let workers = self.stores().workers.list_workers().await?;
        let range = start.zip(end);
        Ok(summarize(timesheets, &workers, range))
    }

    /// Expenses of a worker filtered by date and review status
    pub async fn expenses(
        &self,
        worker_id: &WorkerId,
        date: Option<NaiveDate>,
        status: Option<ExpenseStatus>,
    ) -> Result<Vec<ExpenseEntry>> {
        let expenses = self.stores().expenses.expenses_for_worker(worker_id).await?;
        Ok(expenses
            .into_iter()
            .filter(|expense| date.map_or(true, |d| expense.date.date_naive() == d))
            .filter(|expense| status.map_or(true, |s| expense.status == s))
            .collect())
    }

    pub async fn set_expense_status(
        &self,
        id: ExpenseId,
        status: ExpenseStatus,
    ) -> Result<ExpenseEntry> {
        let expense = self.stores().expenses.set_expense_status(id, status).await?;
        tracing::info!(expense_id = %id, status = ?status, "Expense status updated");
        Ok(expense)
    }

    /// Fetch an expense or fail with NotFound
    pub async fn get_expense(&self, id: ExpenseId) -> Result<ExpenseEntry> {
        self.stores()
            .expenses
            .get_expense(id)
            .await?
            .ok_or_else(|| FieldnavError::not_found("Expense", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use fieldnav_core::models::{Coordinates, SiteId, WorkerStatus};

    fn entry(worker: &str, day: u32, hours: f64) -> TimesheetEntry {
        let start = Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap();
        let here = Coordinates::new(22.7196, 75.8577);
        let mut entry = TimesheetEntry::open(WorkerId::from(worker), SiteId(1), start, here);
        entry.close(start + chrono::Duration::minutes((hours * 60.0) as i64), here);
        entry
    }

    fn mileage(worker: &str, day: u32, meters: f64, amount: f64) -> ExpenseEntry {
        ExpenseEntry {
            id: ExpenseId::new(),
            worker_id: WorkerId::from(worker),
            date: Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap(),
            kind: ExpenseKind::Mileage,
            amount,
            description: String::new(),
            distance_m: Some(meters),
            status: ExpenseStatus::Pending,
        }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(0.856), 0.86);
        assert_eq!(round2(0.854), 0.85);
        assert_eq!(round2(1.0 / 3.0), 0.33);
        assert_eq!(round2(2.0), 2.0);
    }

    #[test]
    fn test_daily_totals_only_count_that_day() {
        let timesheets = vec![entry("2", 4, 1.5), entry("2", 4, 0.75), entry("2", 5, 3.0)];
        let mut meal = mileage("2", 4, 0.0, 7.25);
        meal.kind = ExpenseKind::Meal;
        meal.distance_m = None;
        let expenses = vec![mileage("2", 4, 1_710.7, 0.86), meal, mileage("2", 5, 5_000.0, 2.5)];

        let daily = daily_totals(WorkerId::from("2"), date(4), timesheets, &expenses);

        assert_eq!(daily.entries.len(), 2);
        assert_eq!(daily.total_hours, 2.25);
        assert_eq!(daily.total_distance_km, 1.71);
        assert_eq!(daily.total_expenses, 8.11);
    }

    #[test]
    fn test_summary_groups_by_worker_and_day() {
        let workers = vec![Worker {
            id: WorkerId::from("2"),
            email: String::new(),
            first_name: "Rajesh".to_string(),
            last_name: "Kumar".to_string(),
            phone: String::new(),
            employee_id: String::new(),
            team_id: String::new(),
            current_status: WorkerStatus::Available,
            current_location: None,
        }];
        let timesheets = vec![
            entry("2", 4, 1.0),
            entry("9", 4, 2.0),
            entry("2", 4, 0.5),
            entry("2", 6, 1.0),
        ];

        let rows = summarize(timesheets.clone(), &workers, None);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].worker_name, "Rajesh Kumar");
        assert_eq!(rows[0].entries.len(), 2);
        assert_eq!(rows[0].total_hours, 1.5);
        assert_eq!(rows[1].worker_name, "Unknown");

        let ranged = summarize(timesheets.clone(), &workers, Some((date(5), date(6))));
        assert_eq!(ranged.len(), 1);
        assert_eq!(ranged[0].date, date(6));
    }
}
