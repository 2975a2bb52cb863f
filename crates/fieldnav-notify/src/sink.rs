use async_trait::async_trait;
use chrono::Utc;
use fieldnav_core::error::Result;
use fieldnav_core::models::{NewNotification, Notification};
use fieldnav_store::ports::NotificationStore;
use std::sync::Arc;

use crate::ports::NotificationSink;

/// Notification sink that writes into the notification inbox store
#[derive(Clone)]
pub struct StoreNotificationSink {
    store: Arc<dyn NotificationStore>,
}

impl StoreNotificationSink {
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl NotificationSink for StoreNotificationSink {
    async fn create(&self, notification: NewNotification) -> Result<Notification> {
        let notification = notification.into_notification(Utc::now());
        self.store.insert_notification(notification.clone()).await?;

        tracing::debug!(
            user_id = %notification.user_id,
            kind = ?notification.kind,
            "Notification created"
        );
        Ok(notification)
    }
}
