use async_trait::async_trait;
use fieldnav_core::error::Result;
use fieldnav_core::models::{AuditConnection, AuditEvent, AuditReceipt};
use uuid::Uuid;

use crate::ports::AuditNotifier;

/// Audit notifier used when no ledger endpoint is configured.
///
/// Every event is logged locally with its content hash and acknowledged with a
/// `demo_tx_` transaction ID.
#[derive(Debug, Clone, Default)]
pub struct DemoAuditNotifier;

impl DemoAuditNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuditNotifier for DemoAuditNotifier {
    async fn log_event(&self, event: &AuditEvent) -> Result<AuditReceipt> {
        let transaction_id = format!("demo_tx_{}", Uuid::new_v4().simple());

        tracing::info!(
            worker_id = %event.worker_id,
            kind = ?event.kind,
            data_hash = %event.data_hash(),
            transaction_id = %transaction_id,
            "Demo audit log"
        );

        Ok(AuditReceipt {
            transaction_id,
            success: true,
            error: None,
        })
    }

    fn status(&self) -> AuditConnection {
        AuditConnection {
            connected: false,
            endpoint: None,
        }
    }
}
