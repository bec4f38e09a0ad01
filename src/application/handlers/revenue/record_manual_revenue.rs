//! RecordManualRevenueHandler - operator-entered one-time revenue.
//!
//! Subscription revenue is written by payment settlement; this covers
//! everything else (setup fees, design work, ad-hoc charges).

use std::sync::Arc;

use crate::domain::billing::{BillingError, RevenueEntry};
use crate::domain::foundation::{CustomerId, RevenueEntryId, Timestamp};
use crate::ports::{CustomerRepository, RevenueLedger};

/// Command for a manual one-time ledger entry.
#[derive(Debug, Clone)]
pub struct RecordManualRevenueCommand {
    pub client_id: CustomerId,
    /// Amount in cents.
    pub amount: i64,
    pub description: String,
    pub now: Timestamp,
}

pub struct RecordManualRevenueHandler {
    customers: Arc<dyn CustomerRepository>,
    revenue: Arc<dyn RevenueLedger>,
}

impl RecordManualRevenueHandler {
    pub fn new(customers: Arc<dyn CustomerRepository>, revenue: Arc<dyn RevenueLedger>) -> Self {
        Self { customers, revenue }
    }

    pub async fn handle(
        &self,
        cmd: RecordManualRevenueCommand,
    ) -> Result<RevenueEntryId, BillingError> {
        if cmd.amount <= 0 {
            return Err(BillingError::validation("amount", "must be positive"));
        }
        if cmd.description.trim().is_empty() {
            return Err(BillingError::validation("description", "is required"));
        }

        self.customers
            .find_by_id(&cmd.client_id)
            .await?
            .ok_or_else(|| BillingError::customer_not_found(cmd.client_id))?;

        let entry = RevenueEntry::one_time(
            cmd.client_id,
            cmd.amount,
            cmd.description,
            cmd.now.date(),
        );
        self.revenue.append(&entry).await?;

        Ok(entry.id)
    }
}
