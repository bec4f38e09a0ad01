//! BlockCustomerHandler - manual operator block of one customer.

use std::sync::Arc;

use crate::domain::billing::BillingError;
use crate::domain::foundation::{CustomerId, Timestamp};
use crate::ports::{AccessControlStore, CascadeReport, CustomerRepository};

/// Command to block a customer and all their websites.
#[derive(Debug, Clone)]
pub struct BlockCustomerCommand {
    pub customer_id: CustomerId,
    pub reason: String,
    pub now: Timestamp,
}

pub struct BlockCustomerHandler {
    customers: Arc<dyn CustomerRepository>,
    access_control: Arc<dyn AccessControlStore>,
}

impl BlockCustomerHandler {
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        access_control: Arc<dyn AccessControlStore>,
    ) -> Self {
        Self {
            customers,
            access_control,
        }
    }

    pub async fn handle(&self, cmd: BlockCustomerCommand) -> Result<CascadeReport, BillingError> {
        if cmd.reason.trim().is_empty() {
            return Err(BillingError::validation("reason", "reason is required"));
        }

        // Resolve first so the operator gets a 404, not a silent no-op.
        self.customers
            .find_by_id(&cmd.customer_id)
            .await?
            .ok_or_else(|| BillingError::customer_not_found(cmd.customer_id))?;

        let report = self
            .access_control
            .block_customer_cascade(&cmd.customer_id, &cmd.reason, cmd.now)
            .await?;

        tracing::info!(
            customer_id = %cmd.customer_id,
            reason = %cmd.reason,
            websites = report.websites_affected,
            "customer blocked"
        );

        Ok(report)
    }
}
