use fieldnav_core::config::DispatchConfig;
use fieldnav_core::models::{AuditConnection, AuditStatus};
use fieldnav_notify::{AuditNotifier, NotificationSink};
use fieldnav_store::Stores;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

use crate::effects::{EffectDispatcher, SideEffect};
use crate::geofence::GeofenceEngine;

/// Entry point for every dispatch use case.
///
/// Mutations validate and commit while holding a single FIFO commit lock, so two
/// assignments can never claim the same worker and location updates for one worker
/// are applied in the order they arrive. Notifications and audit calls run after
/// the lock is released.
pub struct DispatchService {
    stores: Stores,
    config: DispatchConfig,
    engine: GeofenceEngine,
    effects: EffectDispatcher,
    commit: Mutex<()>,
}

impl DispatchService {
    pub fn new(
        stores: Stores,
        audit: Arc<dyn AuditNotifier>,
        notifications: Arc<dyn NotificationSink>,
        config: DispatchConfig,
    ) -> Self {
        let engine = GeofenceEngine::new(stores.clone(), &config);
        let effects = EffectDispatcher::new(audit, notifications, config.audit_timeout);

        Self {
            stores,
            config,
            engine,
            effects,
            commit: Mutex::new(()),
        }
    }

    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub(crate) fn engine(&self) -> &GeofenceEngine {
        &self.engine
    }

    /// Connection state of the audit notifier
    pub fn audit_status(&self) -> AuditConnection {
        self.effects.audit_notifier().status()
    }

    pub(crate) async fn begin_commit(&self) -> MutexGuard<'_, ()> {
        self.commit.lock().await
    }

    pub(crate) async fn dispatch(&self, outbox: Vec<SideEffect>) -> Vec<AuditStatus> {
        self.effects.run(outbox).await
    }
}
