use anyhow::{Context, Result};
use chrono::Utc;
use fieldnav_core::config::{CliConfigOverrides, LayeredConfig};
use fieldnav_dispatch::DispatchService;
use fieldnav_notify::{DemoAuditNotifier, StoreNotificationSink};
use fieldnav_store::{SeedData, Stores};
use std::sync::Arc;

use crate::cli::Cli;

/// Resolve dispatch settings: defaults, then the config file, environment and flags
pub fn resolve_config(cli: &Cli) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();
    if let Some(path) = &cli.config {
        config = config
            .load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?;
    }
    let mut config = config.load_from_env();
    config
        .update_from_cli(CliConfigOverrides {
            mileage_rate_per_km: cli.mileage_rate,
            mileage_threshold_m: cli.mileage_threshold,
            default_geofence_radius_m: cli.geofence_radius,
        })
        .context("Invalid command-line setting")?;
    Ok(config)
}

/// Seeded in-memory dispatch service with the demo audit notifier
pub async fn dispatch_service(cli: &Cli) -> Result<DispatchService> {
    let config = resolve_config(cli)?.to_dispatch_config();

    let seed = match &cli.seed {
        Some(path) => SeedData::from_file(path)
            .with_context(|| format!("Failed to load seed from {}", path.display()))?,
        None => SeedData::demo().context("Built-in demo seed is invalid")?,
    };

    let stores = Stores::in_memory();
    seed.load_into(&stores, config.default_geofence_radius_m, Utc::now())
        .await
        .context("Failed to seed stores")?;

    let notifications = Arc::new(StoreNotificationSink::new(stores.notifications.clone()));
    Ok(DispatchService::new(
        stores,
        Arc::new(DemoAuditNotifier::new()),
        notifications,
        config,
    ))
}
