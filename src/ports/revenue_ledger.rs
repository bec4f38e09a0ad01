//! Revenue ledger port.

use async_trait::async_trait;

use crate::domain::billing::RevenueEntry;
use crate::domain::foundation::{CustomerId, DomainError};

/// Append-only revenue ledger. Entries are never updated or deleted.
#[async_trait]
pub trait RevenueLedger: Send + Sync {
    /// Append an entry to the ledger.
    async fn append(&self, entry: &RevenueEntry) -> Result<(), DomainError>;

    /// All entries recorded for a client, newest first.
    async fn list_by_client(
        &self,
        client_id: &CustomerId,
    ) -> Result<Vec<RevenueEntry>, DomainError>;
}
