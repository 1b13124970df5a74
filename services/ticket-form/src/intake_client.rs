//! Ticket intake client
//!
//! Sends the purchase payload to the configured endpoint.

use async_trait::async_trait;
use reqwest::Client;

use crate::domain::{IntakeReceipt, SubmissionPayload};
use crate::errors::{FormError, Result};

#[async_trait]
pub trait TicketIntake: Send + Sync {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<IntakeReceipt>;
}

/// HTTP client for the ticket intake endpoint
pub struct IntakeClient {
    http: Client,
    endpoint: String,
}

impl IntakeClient {
    pub fn new(endpoint: String) -> Self {
        Self {
            http: Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl TicketIntake for IntakeClient {
    /// Post the payload once and parse the JSON reply
    async fn submit(&self, payload: &SubmissionPayload) -> Result<IntakeReceipt> {
        tracing::debug!(
            url = %self.endpoint,
            tickets = payload.tickets,
            total = %payload.total,
            bank = %payload.bank,
            "Posting ticket purchase"
        );

        let resp = self.http.post(&self.endpoint).json(payload).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FormError::Rejected(status.as_u16()));
        }

        let body = resp.bytes().await?;
        let receipt: IntakeReceipt = serde_json::from_slice(&body)?;

        Ok(receipt)
    }
}
