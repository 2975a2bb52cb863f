use chrono::Utc;
use fieldnav_core::config::LayeredConfig;
use fieldnav_core::error::Result;
use fieldnav_dispatch::DispatchService;
use fieldnav_notify::{AuditNotifier, DemoAuditNotifier, HttpAuditNotifier, StoreNotificationSink};
use fieldnav_store::{SeedData, Stores};
use std::sync::Arc;

use crate::config::ApiConfig;

#[derive(Clone)]
pub struct AppState {
    pub dispatch: Arc<DispatchService>,
}

impl AppState {
    pub fn new(dispatch: Arc<DispatchService>) -> Self {
        Self { dispatch }
    }

    /// Build in-memory stores, seed them and wire the configured audit notifier
    pub async fn bootstrap(config: &ApiConfig) -> Result<Self> {
        let mut layered = LayeredConfig::with_defaults();
        if let Some(path) = &config.config_file {
            layered = layered.load_from_file(path)?;
        }
        let dispatch_config = layered.load_from_env().to_dispatch_config();

        let seed = match &config.seed_file {
            Some(path) => SeedData::from_file(path)?,
            None => SeedData::demo()?,
        };

        let stores = Stores::in_memory();
        seed.load_into(&stores, dispatch_config.default_geofence_radius_m, Utc::now()).await?;

        let audit: Arc<dyn AuditNotifier> = match &config.audit_url {
            Some(url) => {
                tracing::info!(endpoint = %url, "Using HTTP audit ledger");
                Arc::new(HttpAuditNotifier::new(url.clone()))
            }
            None => {
                tracing::info!("Using demo audit notifier (set FIELDNAV_AUDIT_URL for a ledger)");
                Arc::new(DemoAuditNotifier::new())
            }
        };
        let notifications = Arc::new(StoreNotificationSink::new(stores.notifications.clone()));

        let dispatch = DispatchService::new(stores, audit, notifications, dispatch_config);
        Ok(Self::new(Arc::new(dispatch)))
    }
}
