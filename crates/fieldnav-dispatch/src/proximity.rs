use fieldnav_core::error::{FieldnavError, Result};
use fieldnav_core::models::{Coordinates, JobId, Worker};
use fieldnav_geo::{estimate_travel_minutes, haversine_distance, validate_coordinates};

use crate::models::{OptimalWorkers, RankedWorker};
use crate::service::DispatchService;

/// Rank available workers with a known location by distance to `target`.
///
/// Workers beyond `max_distance_m` are dropped. The sort is stable, so equal
/// distances keep directory order. `limit` truncates the ranked list when set.
pub fn rank_workers(
    target: &Coordinates,
    workers: Vec<Worker>,
    max_distance_m: f64,
    limit: Option<usize>,
    minutes_per_km: f64,
) -> Vec<RankedWorker> {
    let mut ranked: Vec<RankedWorker> = workers
        .into_iter()
        .filter(|worker| worker.is_available())
        .filter_map(|worker| {
            let location = worker.current_location?;
            let distance_m = haversine_distance(target, &location);
            Some(RankedWorker {
                worker,
                distance_m,
                estimated_travel_minutes: estimate_travel_minutes(distance_m, minutes_per_km),
            })
        })
        .filter(|candidate| candidate.distance_m <= max_distance_m)
        .collect();

    ranked.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));

    if let Some(limit) = limit {
        ranked.truncate(limit);
    }
    ranked
}

/// Positive finite values are used as given; anything else falls back to `default`
pub(crate) fn distance_or(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => default,
    }
}

pub(crate) fn limit_or(value: Option<usize>, default: usize) -> usize {
    match value {
        Some(v) if v > 0 => v,
        _ => default,
    }
}

impl DispatchService {
    /// Rank the closest available workers for a job. Read-only.
    pub async fn find_optimal_workers(
        &self,
        job_id: JobId,
        max_distance_m: Option<f64>,
        limit: Option<usize>,
    ) -> Result<OptimalWorkers> {
        let job = self
            .stores()
            .jobs
            .get_job(job_id)
            .await?
            .ok_or_else(|| FieldnavError::not_found("Job", job_id))?;

        let config = self.config();
        let max_distance_m = distance_or(max_distance_m, config.default_max_distance_m);
        let limit = limit_or(limit, config.default_limit);

        let workers = self.stores().workers.list_workers().await?;
        let ranked = rank_workers(
            &job.location,
            workers,
            max_distance_m,
            Some(limit),
            config.travel_minutes_per_km,
        );

        tracing::debug!(
            job_id = %job_id,
            max_distance_m,
            limit,
            candidates = ranked.len(),
            "Ranked workers for job"
        );

        Ok(OptimalWorkers {
            job_id,
            job_location: job.location,
            total_available: ranked.len(),
            workers: ranked,
        })
    }

    /// All available workers within `radius_m` of an arbitrary point, nearest first
    pub async fn find_nearby_workers(
        &self,
        target: Coordinates,
        radius_m: Option<f64>,
    ) -> Result<Vec<RankedWorker>> {
        validate_coordinates(&target)?;

        let config = self.config();
        let radius_m = distance_or(radius_m, config.default_nearby_radius_m);
        let workers = self.stores().workers.list_workers().await?;

        Ok(rank_workers(&target, workers, radius_m, None, config.travel_minutes_per_km))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldnav_core::models::{WorkerId, WorkerStatus};
    use proptest::prelude::*;

    const METERS_PER_DEGREE: f64 = 6_371_000.0 * std::f64::consts::PI / 180.0;

    fn worker_at(id: &str, status: WorkerStatus, location: Option<Coordinates>) -> Worker {
        Worker {
            id: WorkerId::from(id),
            email: String::new(),
            first_name: id.to_string(),
            last_name: String::new(),
            phone: String::new(),
            employee_id: String::new(),
            team_id: String::new(),
            current_status: status,
            current_location: location,
        }
    }

    fn north_of(origin: Coordinates, meters: f64) -> Coordinates {
        Coordinates::new(origin.latitude + meters / METERS_PER_DEGREE, origin.longitude)
    }

    #[test]
    fn test_filters_unavailable_and_unlocated() {
        let job = Coordinates::new(28.6129, 77.2295);
        let workers = vec![
            worker_at("busy", WorkerStatus::Busy, Some(north_of(job, 100.0))),
            worker_at("offline", WorkerStatus::Offline, Some(north_of(job, 100.0))),
            worker_at("nowhere", WorkerStatus::Available, None),
            worker_at("ok", WorkerStatus::Available, Some(north_of(job, 500.0))),
        ];

        let ranked = rank_workers(&job, workers, 50_000.0, Some(3), 2.0);

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].worker.id.as_str(), "ok");
    }

    #[test]
    fn test_ties_keep_directory_order() {
        let job = Coordinates::new(28.6129, 77.2295);
        let spot = north_of(job, 1_000.0);
        let workers = vec![
            worker_at("first", WorkerStatus::Available, Some(spot)),
            worker_at("second", WorkerStatus::Available, Some(spot)),
        ];

        let ranked = rank_workers(&job, workers, 50_000.0, None, 2.0);
        let ids: Vec<&str> = ranked.iter().map(|r| r.worker.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
        assert_eq!(ranked[0].estimated_travel_minutes, 2);
    }

    #[test]
    fn test_max_distance_is_inclusive_and_excludes_beyond() {
        let job = Coordinates::new(28.6129, 77.2295);
        let far = north_of(job, 40_000.0);
        let exact = haversine_distance(&job, &far);
        let workers = vec![worker_at("far", WorkerStatus::Available, Some(far))];

        assert_eq!(rank_workers(&job, workers.clone(), exact, None, 2.0).len(), 1);
        assert!(rank_workers(&job, workers, exact - 1.0, None, 2.0).is_empty());
    }

    #[test]
    fn test_parameter_fallbacks() {
        assert_eq!(distance_or(None, 50_000.0), 50_000.0);
        assert_eq!(distance_or(Some(0.0), 50_000.0), 50_000.0);
        assert_eq!(distance_or(Some(f64::NAN), 50_000.0), 50_000.0);
        assert_eq!(distance_or(Some(-3.0), 50_000.0), 50_000.0);
        assert_eq!(distance_or(Some(2_000.0), 50_000.0), 2_000.0);
        assert_eq!(limit_or(Some(0), 3), 3);
        assert_eq!(limit_or(Some(7), 3), 7);
    }

    fn candidate() -> impl Strategy<Value = (f64, WorkerStatus, bool)> {
        (
            0.0f64..120_000.0,
            prop_oneof![
                Just(WorkerStatus::Available),
                Just(WorkerStatus::Busy),
                Just(WorkerStatus::Offline)
            ],
            any::<bool>(),
        )
    }

    proptest! {
        #[test]
        fn prop_ranking_is_sorted_bounded_and_filtered(
            candidates in prop::collection::vec(candidate(), 0..20),
            limit in 1usize..6,
        ) {
            let job = Coordinates::new(28.6129, 77.2295);
            let workers: Vec<Worker> = candidates
                .iter()
                .enumerate()
                .map(|(i, (meters, status, located))| {
                    let location = located.then(|| north_of(job, *meters));
                    worker_at(&i.to_string(), *status, location)
                })
                .collect();

            let ranked = rank_workers(&job, workers, 50_000.0, Some(limit), 2.0);

            prop_assert!(ranked.len() <= limit);
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].distance_m <= pair[1].distance_m);
            }
            for r in &ranked {
                prop_assert!(r.distance_m <= 50_000.0);
                prop_assert!(r.worker.is_available());
                prop_assert!(r.worker.current_location.is_some());
            }
        }
    }
}
