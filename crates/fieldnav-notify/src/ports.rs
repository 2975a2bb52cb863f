//! Collaborator port definitions

use async_trait::async_trait;
use fieldnav_core::error::Result;
use fieldnav_core::models::{AuditConnection, AuditEvent, AuditReceipt, NewNotification, Notification};

/// Port for the tamper-evident audit ledger
#[async_trait]
pub trait AuditNotifier: Send + Sync {
    /// Record an attendance or assignment event
    ///
    /// # Returns
    /// Receipt carrying the ledger transaction ID. Implementations report transport
    /// failures as `Collaborator` errors; the caller never lets them fail the
    /// operation that produced the event.
    async fn log_event(&self, event: &AuditEvent) -> Result<AuditReceipt>;

    /// Report whether the notifier is connected to a real ledger
    fn status(&self) -> AuditConnection;
}

/// Port for creating user-facing notifications
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Persist and deliver a notification
    async fn create(&self, notification: NewNotification) -> Result<Notification>;
}
