//! Support message store port.

use async_trait::async_trait;

use crate::domain::billing::SupportMessage;
use crate::domain::foundation::DomainError;

/// Store for inbound support messages.
#[async_trait]
pub trait SupportMessageStore: Send + Sync {
    /// Persist a new support message.
    async fn insert(&self, message: &SupportMessage) -> Result<(), DomainError>;
}
