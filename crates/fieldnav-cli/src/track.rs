//! GPX track loading for replay

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use fieldnav_core::models::Coordinates;
use gpx::{read, Gpx, Time, Waypoint};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// One position report reconstructed from a GPX point
#[derive(Debug, Clone, Copy)]
pub struct TrackFix {
    pub coordinates: Coordinates,
    pub timestamp: DateTime<Utc>,
}

pub fn read_gpx(path: &Path) -> Result<Gpx> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open GPX file {}", path.display()))?;
    read(BufReader::new(file)).with_context(|| format!("Failed to parse GPX file {}", path.display()))
}

/// Track points in file order, or the waypoints when the file has no tracks.
///
/// Points without a timestamp are placed `interval` after the previous point. Leading
/// untimed points count back from the first timed one, or start at `start` when no
/// point carries a time.
pub fn track_fixes(gpx: &Gpx, start: DateTime<Utc>, interval: Duration) -> Vec<TrackFix> {
    let mut points: Vec<&Waypoint> = gpx
        .tracks
        .iter()
        .flat_map(|track| track.segments.iter())
        .flat_map(|segment| segment.points.iter())
        .collect();
    if points.is_empty() {
        points = gpx.waypoints.iter().collect();
    }

    let times: Vec<Option<DateTime<Utc>>> =
        points.iter().map(|point| point.time.as_ref().and_then(to_utc)).collect();
    let first = times
        .iter()
        .enumerate()
        .find_map(|(index, time)| time.map(|at| at - interval * index as i32))
        .unwrap_or(start);

    let mut previous: Option<DateTime<Utc>> = None;
    points
        .into_iter()
        .zip(times)
        .map(|(point, time)| {
            let timestamp =
                time.unwrap_or_else(|| previous.map_or(first, |at| at + interval));
            previous = Some(timestamp);

            let position = point.point();
            TrackFix {
                coordinates: Coordinates::new(position.y(), position.x()),
                timestamp,
            }
        })
        .collect()
}

fn to_utc(time: &Time) -> Option<DateTime<Utc>> {
    let formatted = time.format().ok()?;
    DateTime::parse_from_rfc3339(&formatted)
        .ok()
        .map(|at| at.with_timezone(&Utc))
}
