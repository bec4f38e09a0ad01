//! Support messages sent from blocked client sites.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SupportMessageId, Timestamp, ValidationError};

/// Triage status of a support message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportMessageStatus {
    #[default]
    New,
    Read,
    Replied,
    Closed,
}

/// A ticket-like message submitted from a client website.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportMessage {
    pub id: SupportMessageId,
    pub domain: String,
    pub message: String,
    pub email: Option<String>,
    pub user_agent: Option<String>,
    pub page_url: Option<String>,
    pub status: SupportMessageStatus,
    pub created_at: Timestamp,
}

impl SupportMessage {
    /// Creates a new message with status `New`.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `domain` or `message` is empty.
    pub fn new(
        domain: impl Into<String>,
        message: impl Into<String>,
        email: Option<String>,
        user_agent: Option<String>,
        page_url: Option<String>,
        created_at: Timestamp,
    ) -> Result<Self, ValidationError> {
        let domain = domain.into();
        let message = message.into();
        if domain.trim().is_empty() {
            return Err(ValidationError::empty_field("domain"));
        }
        if message.trim().is_empty() {
            return Err(ValidationError::empty_field("message"));
        }

        Ok(Self {
            id: SupportMessageId::new(),
            domain,
            message,
            email,
            user_agent,
            page_url,
            status: SupportMessageStatus::New,
            created_at,
        })
    }
}
