use async_trait::async_trait;
use fieldnav_core::error::{FieldnavError, Result};
use fieldnav_core::models::{AuditConnection, AuditEvent, AuditReceipt};
use serde::Serialize;

use crate::ports::AuditNotifier;

const SERVICE: &str = "audit ledger";

/// Audit notifier that posts events to an HTTP ledger gateway
pub struct HttpAuditNotifier {
    /// Base URL of the ledger gateway (e.g., "http://localhost:8545")
    base_url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpAuditNotifier {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn events_url(&self) -> String {
        format!("{}/events", self.base_url)
    }
}

#[async_trait]
impl AuditNotifier for HttpAuditNotifier {
    async fn log_event(&self, event: &AuditEvent) -> Result<AuditReceipt> {
        let request = AuditRequest {
            event,
            data_hash: event.data_hash(),
        };

        let response = self
            .client
            .post(self.events_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| FieldnavError::Collaborator {
                service: SERVICE.to_string(),
                reason: format!("Failed to reach {}: {}", self.base_url, e),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(FieldnavError::Collaborator {
                service: SERVICE.to_string(),
                reason: format!("Ledger API error ({}): {}", status, error_text),
            });
        }

        let receipt: AuditReceipt =
            response.json().await.map_err(|e| FieldnavError::Collaborator {
                service: SERVICE.to_string(),
                reason: format!("Failed to parse ledger response: {}", e),
            })?;

        if !receipt.success {
            return Err(FieldnavError::Collaborator {
                service: SERVICE.to_string(),
                reason: receipt.error.unwrap_or_else(|| "ledger rejected the event".to_string()),
            });
        }

        Ok(receipt)
    }

    fn status(&self) -> AuditConnection {
        AuditConnection {
            connected: true,
            endpoint: Some(self.base_url.clone()),
        }
    }
}

/// Request body for the ledger gateway
#[derive(Debug, Serialize)]
struct AuditRequest<'a> {
    #[serde(flatten)]
    event: &'a AuditEvent,
    data_hash: String,
}
