//! Post-commit side effects.
//!
//! Mutating operations collect their notifications and audit events into an outbox
//! while holding the commit lock, then hand the outbox to the [`EffectDispatcher`]
//! once the lock is released. Nothing in here can fail the originating operation.

use fieldnav_core::models::{AuditEvent, AuditStatus, NewNotification};
use fieldnav_notify::{AuditNotifier, NotificationSink};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Effect produced by a committed state change
#[derive(Debug, Clone, PartialEq)]
pub enum SideEffect {
    Notify(NewNotification),
    Audit(AuditEvent),
}

/// Runs outbox entries against the collaborator ports with a bounded wait
#[derive(Clone)]
pub struct EffectDispatcher {
    audit: Arc<dyn AuditNotifier>,
    notifications: Arc<dyn NotificationSink>,
    timeout: Duration,
}

impl EffectDispatcher {
    pub fn new(
        audit: Arc<dyn AuditNotifier>,
        notifications: Arc<dyn NotificationSink>,
        timeout: Duration,
    ) -> Self {
        Self {
            audit,
            notifications,
            timeout,
        }
    }

    pub fn audit_notifier(&self) -> &Arc<dyn AuditNotifier> {
        &self.audit
    }

    /// Run every effect in order.
    ///
    /// Returns one [`AuditStatus`] per `Audit` entry, in outbox order.
    pub async fn run(&self, outbox: Vec<SideEffect>) -> Vec<AuditStatus> {
        let mut statuses = Vec::new();
        for effect in outbox {
            match effect {
                SideEffect::Notify(notification) => self.notify(notification).await,
                SideEffect::Audit(event) => statuses.push(self.audit(&event).await),
            }
        }
        statuses
    }

    /// Record an audit event, degrading on error or timeout
    pub async fn audit(&self, event: &AuditEvent) -> AuditStatus {
        match timeout(self.timeout, self.audit.log_event(event)).await {
            Ok(Ok(receipt)) => {
                tracing::info!(
                    worker_id = %event.worker_id,
                    kind = ?event.kind,
                    transaction_id = %receipt.transaction_id,
                    "Audit event recorded"
                );
                AuditStatus::Recorded {
                    transaction_id: receipt.transaction_id,
                }
            }
            Ok(Err(e)) => {
                tracing::warn!(
                    worker_id = %event.worker_id,
                    kind = ?event.kind,
                    error = %e,
                    "Audit logging failed"
                );
                AuditStatus::Degraded {
                    reason: e.to_string(),
                }
            }
            Err(_) => {
                tracing::warn!(
                    worker_id = %event.worker_id,
                    kind = ?event.kind,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Audit logging timed out"
                );
                AuditStatus::Degraded {
                    reason: format!("audit call timed out after {} ms", self.timeout.as_millis()),
                }
            }
        }
    }

    async fn notify(&self, notification: NewNotification) {
        let user_id = notification.user_id.clone();
        match timeout(self.timeout, self.notifications.create(notification)).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => {
                tracing::warn!(user_id = %user_id, error = %e, "Notification delivery failed");
            }
            Err(_) => {
                tracing::warn!(user_id = %user_id, "Notification delivery timed out");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use fieldnav_core::error::{FieldnavError, Result};
    use fieldnav_core::models::{
        AuditConnection, AuditEventKind, AuditReceipt, Notification, NotificationKind, WorkerId,
    };
    use fieldnav_notify::DemoAuditNotifier;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        created: Mutex<Vec<NewNotification>>,
    }

    #[async_trait]
    impl NotificationSink for RecordingSink {
        async fn create(&self, notification: NewNotification) -> Result<Notification> {
            self.created.lock().unwrap().push(notification.clone());
            Ok(notification.into_notification(Utc::now()))
        }
    }

    struct FailingNotifier;

    #[async_trait]
    impl AuditNotifier for FailingNotifier {
        async fn log_event(&self, _event: &AuditEvent) -> Result<AuditReceipt> {
            Err(FieldnavError::Collaborator {
                service: "audit ledger".to_string(),
                reason: "connection refused".to_string(),
            })
        }

        fn status(&self) -> AuditConnection {
            AuditConnection {
                connected: false,
                endpoint: None,
            }
        }
    }

    struct StalledNotifier;

    #[async_trait]
    impl AuditNotifier for StalledNotifier {
        async fn log_event(&self, _event: &AuditEvent) -> Result<AuditReceipt> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            unreachable!("the dispatcher abandons the call first")
        }

        fn status(&self) -> AuditConnection {
            AuditConnection {
                connected: true,
                endpoint: None,
            }
        }
    }

    fn event() -> AuditEvent {
        AuditEvent::new(WorkerId::from("2"), AuditEventKind::CheckIn, Utc::now())
    }

    #[tokio::test]
    async fn test_run_preserves_audit_order_and_delivers_notifications() {
        let sink = Arc::new(RecordingSink::default());
        let dispatcher = EffectDispatcher::new(
            Arc::new(DemoAuditNotifier::new()),
            sink.clone(),
            Duration::from_secs(1),
        );

        let statuses = dispatcher
            .run(vec![
                SideEffect::Notify(NewNotification::new("2", NotificationKind::CheckIn, "a", "")),
                SideEffect::Audit(event()),
                SideEffect::Audit(event()),
            ])
            .await;

        assert_eq!(statuses.len(), 2);
        assert!(statuses.iter().all(|s| s.transaction_id().is_some()));
        assert_eq!(sink.created.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failing_notifier_degrades() {
        let dispatcher = EffectDispatcher::new(
            Arc::new(FailingNotifier),
            Arc::new(RecordingSink::default()),
            Duration::from_secs(1),
        );

        let status = dispatcher.audit(&event()).await;
        match status {
            AuditStatus::Degraded { reason } => assert!(reason.contains("connection refused")),
            other => panic!("expected degraded, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_stalled_notifier_times_out() {
        let dispatcher = EffectDispatcher::new(
            Arc::new(StalledNotifier),
            Arc::new(RecordingSink::default()),
            Duration::from_millis(50),
        );

        let started = std::time::Instant::now();
        let status = dispatcher.audit(&event()).await;

        assert!(status.is_degraded());
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
