//! Notification inbox queries.

use fieldnav_core::error::Result;
use fieldnav_core::models::{Notification, NotificationId};

use crate::service::DispatchService;

impl DispatchService {
    /// Notifications for a user, newest first
    pub async fn notifications(&self, user_id: &str, unread_only: bool) -> Result<Vec<Notification>> {
        let mut notifications = self.stores().notifications.notifications_for_user(user_id).await?;
        if unread_only {
            notifications.retain(|notification| !notification.read);
        }
        // Equal timestamps: later insertions first
        notifications.reverse();
        notifications.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(notifications)
    }

    pub async fn mark_notification_read(&self, id: NotificationId) -> Result<Notification> {
        self.stores().notifications.mark_read(id).await
    }

    /// Mark all of a user's notifications read, returning how many changed
    pub async fn mark_all_notifications_read(&self, user_id: &str) -> Result<usize> {
        let marked = self.stores().notifications.mark_all_read(user_id).await?;
        tracing::debug!(user_id = %user_id, marked, "Notifications marked read");
        Ok(marked)
    }

    pub async fn unread_notification_count(&self, user_id: &str) -> Result<usize> {
        self.stores().notifications.unread_count(user_id).await
    }
}
