use fieldnav_core::models::{ExpenseEntry, GeofenceEvent, JobSite, TimesheetEntry, WorkerId};
use fieldnav_dispatch::RankedWorker;
use serde::Serialize;
use tabled::Tabled;

/// Output for replay command
#[derive(Debug, Serialize)]
pub struct ReplayOutput {
    pub worker_id: WorkerId,
    pub points: usize,
    pub skipped: usize,
    pub events: Vec<GeofenceEvent>,
    pub timesheets: Vec<TimesheetEntry>,
    pub expenses: Vec<ExpenseEntry>,
    pub degraded_audits: usize,
}

#[derive(Debug, Tabled)]
pub struct WorkerRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Distance")]
    pub distance: String,
    #[tabled(rename = "Travel")]
    pub travel: String,
}

impl From<&RankedWorker> for WorkerRow {
    fn from(ranked: &RankedWorker) -> Self {
        Self {
            id: ranked.worker.id.to_string(),
            name: ranked.worker.display_name(),
            distance: format!("{:.2} km", ranked.distance_m / 1000.0),
            travel: format!("{} min", ranked.estimated_travel_minutes),
        }
    }
}

#[derive(Debug, Tabled)]
pub struct SiteRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Center")]
    pub center: String,
    #[tabled(rename = "Radius")]
    pub radius: String,
}

impl From<&JobSite> for SiteRow {
    fn from(site: &JobSite) -> Self {
        Self {
            id: site.id.to_string(),
            name: site.name.clone(),
            center: site.geofence.center.to_string(),
            radius: format!("{} m", site.geofence.radius_m),
        }
    }
}

#[derive(Debug, Tabled)]
pub struct EventRow {
    #[tabled(rename = "Time")]
    pub time: String,
    #[tabled(rename = "Event")]
    pub event: String,
    #[tabled(rename = "Site")]
    pub site: String,
    #[tabled(rename = "Location")]
    pub location: String,
}

impl From<&GeofenceEvent> for EventRow {
    fn from(event: &GeofenceEvent) -> Self {
        Self {
            time: event.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            event: format!("{:?}", event.kind).to_lowercase(),
            site: event.site_id.to_string(),
            location: event.location.to_string(),
        }
    }
}

#[derive(Debug, Tabled)]
pub struct TimesheetRow {
    #[tabled(rename = "Site")]
    pub site: String,
    #[tabled(rename = "Check-in")]
    pub check_in: String,
    #[tabled(rename = "Check-out")]
    pub check_out: String,
    #[tabled(rename = "Hours")]
    pub hours: String,
}

impl From<&TimesheetEntry> for TimesheetRow {
    fn from(entry: &TimesheetEntry) -> Self {
        Self {
            site: entry.site_id.to_string(),
            check_in: entry.check_in_time.format("%H:%M:%S").to_string(),
            check_out: entry
                .check_out_time
                .map(|at| at.format("%H:%M:%S").to_string())
                .unwrap_or_else(|| "-".to_string()),
            hours: entry
                .total_hours
                .map(|hours| format!("{:.2}", hours))
                .unwrap_or_else(|| "active".to_string()),
        }
    }
}

#[derive(Debug, Tabled)]
pub struct ExpenseRow {
    #[tabled(rename = "Amount")]
    pub amount: String,
    #[tabled(rename = "Description")]
    pub description: String,
    #[tabled(rename = "Status")]
    pub status: String,
}

impl From<&ExpenseEntry> for ExpenseRow {
    fn from(expense: &ExpenseEntry) -> Self {
        Self {
            amount: format!("{:.2}", expense.amount),
            description: expense.description.clone(),
            status: format!("{:?}", expense.status).to_lowercase(),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Setting")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}
