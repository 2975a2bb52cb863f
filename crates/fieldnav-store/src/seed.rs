//! Seed fixtures for populating a fresh set of stores.

use chrono::{DateTime, Utc};
use fieldnav_core::error::{FieldnavError, Result};
use fieldnav_core::models::{NewJob, NewJobSite, Worker};
use fieldnav_geo::{validate_coordinates, validate_radius};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ports::Stores;

const DEMO_SEED: &str = include_str!("../seed/demo.toml");

/// Workers, jobs and job sites to load into empty stores
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub workers: Vec<Worker>,

    #[serde(default)]
    pub jobs: Vec<NewJob>,

    #[serde(default)]
    pub sites: Vec<NewJobSite>,
}

impl SeedData {
    /// Embedded demo directory
    pub fn demo() -> Result<Self> {
        Self::from_toml(DEMO_SEED)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let seed: SeedData = toml::from_str(content)
            .map_err(|e| FieldnavError::Serialization(format!("Invalid seed data: {}", e)))?;
        seed.validate()?;
        Ok(seed)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    fn validate(&self) -> Result<()> {
        for worker in &self.workers {
            if let Some(location) = &worker.current_location {
                validate_coordinates(location)?;
            }
        }
        for job in &self.jobs {
            validate_coordinates(&job.location)?;
        }
        for site in &self.sites {
            validate_coordinates(&site.coordinates)?;
            if let Some(radius) = site.geofence_radius_m {
                validate_radius(radius)?;
            }
        }
        Ok(())
    }

    /// Insert everything into the stores; jobs and sites receive fresh IDs in file order
    pub async fn load_into(
        &self,
        stores: &Stores,
        default_radius_m: f64,
        now: DateTime<Utc>,
    ) -> Result<()> {
        for worker in &self.workers {
            stores.workers.insert_worker(worker.clone()).await?;
        }
        for job in &self.jobs {
            stores.jobs.create_job(job.clone(), now).await?;
        }
        for site in &self.sites {
            stores.sites.register_site(site.clone(), default_radius_m).await?;
        }

        tracing::info!(
            workers = self.workers.len(),
            jobs = self.jobs.len(),
            sites = self.sites.len(),
            "Seeded stores"
        );
        Ok(())
    }
}
