//! Worker directory and job-site registry operations.

use fieldnav_core::error::{FieldnavError, Result};
use fieldnav_core::models::{JobSite, NewJobSite, SiteId, Worker, WorkerId, WorkerStatus};
use fieldnav_geo::{validate_coordinates, validate_radius};

use crate::service::DispatchService;

impl DispatchService {
    pub async fn list_workers(&self) -> Result<Vec<Worker>> {
        self.stores().workers.list_workers().await
    }

    pub async fn get_worker(&self, worker_id: &WorkerId) -> Result<Worker> {
        self.require_worker(worker_id).await
    }

    /// Set a worker's availability by hand
    pub async fn set_worker_status(
        &self,
        worker_id: &WorkerId,
        status: WorkerStatus,
    ) -> Result<Worker> {
        let _commit = self.begin_commit().await;
        self.stores().workers.set_status(worker_id, status).await?;

        tracing::info!(worker_id = %worker_id, status = %status, "Worker status updated");
        self.require_worker(worker_id).await
    }

    pub async fn list_sites(&self) -> Result<Vec<JobSite>> {
        self.stores().sites.list_sites().await
    }

    pub async fn get_site(&self, site_id: SiteId) -> Result<JobSite> {
        self.stores()
            .sites
            .get_site(site_id)
            .await?
            .ok_or_else(|| FieldnavError::not_found("Job site", site_id))
    }

    /// Register a job site with a circular geofence centered on it
    pub async fn register_site(&self, site: NewJobSite) -> Result<JobSite> {
        if site.name.trim().is_empty() {
            return Err(FieldnavError::invalid_input("name", "must not be empty"));
        }
        validate_coordinates(&site.coordinates)?;
        if let Some(radius) = site.geofence_radius_m {
            validate_radius(radius)?;
        }

        let _commit = self.begin_commit().await;
        let site = self
            .stores()
            .sites
            .register_site(site, self.config().default_geofence_radius_m)
            .await?;

        tracing::info!(
            site_id = %site.id,
            name = %site.name,
            radius_m = site.geofence.radius_m,
            "Job site registered"
        );
        Ok(site)
    }
}
