//! SubmitSupportMessageHandler - intake for messages sent from client
//! sites, typically while they are blocked.

use std::sync::Arc;

use crate::domain::billing::{BillingError, SupportMessage};
use crate::domain::foundation::{SupportMessageId, Timestamp};
use crate::ports::SupportMessageStore;

/// Command carrying an inbound support message.
#[derive(Debug, Clone)]
pub struct SubmitSupportMessageCommand {
    pub domain: String,
    pub message: String,
    pub email: Option<String>,
    pub user_agent: Option<String>,
    pub page_url: Option<String>,
    /// Client-reported timestamp; the server time is used when absent.
    pub timestamp: Option<Timestamp>,
    pub now: Timestamp,
}

pub struct SubmitSupportMessageHandler {
    store: Arc<dyn SupportMessageStore>,
}

impl SubmitSupportMessageHandler {
    pub fn new(store: Arc<dyn SupportMessageStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: SubmitSupportMessageCommand,
    ) -> Result<SupportMessageId, BillingError> {
        let message = SupportMessage::new(
            cmd.domain,
            cmd.message,
            cmd.email,
            cmd.user_agent,
            cmd.page_url,
            cmd.timestamp.unwrap_or(cmd.now),
        )
        .map_err(|e| BillingError::validation("message", e.to_string()))?;

        self.store.insert(&message).await?;

        tracing::info!(domain = %message.domain, "support message received");

        Ok(message.id)
    }
}
