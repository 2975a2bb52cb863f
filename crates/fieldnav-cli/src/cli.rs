use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// FieldNav - Field workforce dispatch and attendance tracking
#[derive(Parser, Debug)]
#[command(name = "fieldnav")]
#[command(about = "Field workforce dispatch and attendance tracking", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Seed file with workers, jobs and job sites (defaults to the built-in demo data)
    #[arg(long, global = true, value_name = "FILE")]
    pub seed: Option<PathBuf>,

    /// Dispatch settings file (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Mileage reimbursement rate per kilometer
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub mileage_rate: Option<f64>,

    /// Minimum check-in to check-out distance in meters before mileage is booked
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub mileage_threshold: Option<f64>,

    /// Geofence radius in meters for sites that do not set one
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub geofence_radius: Option<f64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Feed a GPX track through the geofence engine
    Replay(ReplayArgs),

    /// List available workers near a point
    Nearby(NearbyArgs),

    /// Rank the closest available workers for a job
    Optimal(OptimalArgs),

    /// List registered job sites and their geofences
    Sites,

    /// Show resolved dispatch settings and where each value came from
    Config,
}

#[derive(Parser, Debug)]
pub struct ReplayArgs {
    /// Path to the GPX file
    pub path: PathBuf,

    /// Worker the track belongs to
    #[arg(long, short = 'w')]
    pub worker: String,

    /// Seconds between points that carry no timestamp
    #[arg(long, default_value = "60")]
    pub interval_secs: u32,
}

#[derive(Parser, Debug)]
pub struct NearbyArgs {
    /// Latitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lng: f64,

    /// Search radius in meters
    #[arg(long)]
    pub radius: Option<f64>,
}

#[derive(Parser, Debug)]
pub struct OptimalArgs {
    /// Job ID
    pub job_id: u64,

    /// Maximum distance in meters
    #[arg(long)]
    pub max_distance: Option<f64>,

    /// Number of workers to return
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}
