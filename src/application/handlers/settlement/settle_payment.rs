//! SettlePaymentHandler - applies a verified payment to a subscription.
//!
//! Extends the billing period by calendar months stacking on the later of
//! today or the existing end date, reactivates the customer, cascades the
//! website unblock, and appends a revenue ledger entry.
//!
//! Once the customer row has been updated (step 1 below), access has been
//! credited: failures in the remaining steps surface as
//! `SettlementIncomplete`, never as a silently ignored payment.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::billing::{BillingError, RevenueEntry, SettlementStage};
use crate::domain::foundation::{CustomerId, Timestamp};
use crate::ports::{AccessControlStore, CustomerRepository, RevenueLedger};

/// Command carrying an already-verified payment event.
#[derive(Debug, Clone)]
pub struct SettlePaymentCommand {
    pub customer_id: CustomerId,
    /// Amount paid, in cents.
    pub amount: i64,
    /// Calendar months covered by the payment.
    pub months_paid: u32,
    /// Payment-provider reference.
    pub reference: String,
    pub now: Timestamp,
}

/// Result of a completed settlement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementOutcome {
    pub customer_id: CustomerId,
    pub new_end_date: NaiveDate,
    pub months_paid: u32,
    pub websites_unblocked: u64,
}

pub struct SettlePaymentHandler {
    customers: Arc<dyn CustomerRepository>,
    access_control: Arc<dyn AccessControlStore>,
    revenue: Arc<dyn RevenueLedger>,
}

impl SettlePaymentHandler {
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        access_control: Arc<dyn AccessControlStore>,
        revenue: Arc<dyn RevenueLedger>,
    ) -> Self {
        Self {
            customers,
            access_control,
            revenue,
        }
    }

    pub async fn handle(
        &self,
        cmd: SettlePaymentCommand,
    ) -> Result<SettlementOutcome, BillingError> {
        if cmd.months_paid == 0 {
            return Err(BillingError::validation(
                "months_paid",
                "must be at least one month",
            ));
        }

        let customer = self
            .customers
            .find_by_id(&cmd.customer_id)
            .await?
            .ok_or_else(|| BillingError::customer_not_found(cmd.customer_id))?;

        let today = cmd.now.date();
        let new_end = customer.extended_end_date(cmd.months_paid, today);

        // 1. Reactivate and extend in one atomic write. From here on the
        //    payment is credited to access state.
        self.customers
            .apply_settlement(&cmd.customer_id, new_end, cmd.now)
            .await?;

        // 2. Restore the customer's websites.
        let cascade = self
            .access_control
            .unblock_customer_cascade(&cmd.customer_id, cmd.now)
            .await
            .map_err(|e| {
                BillingError::settlement_incomplete(
                    cmd.customer_id,
                    SettlementStage::WebsiteCascade,
                    e.to_string(),
                )
            })?;

        // 3. Record the money.
        let entry = RevenueEntry::subscription(
            cmd.customer_id,
            cmd.amount,
            cmd.months_paid,
            cmd.reference.clone(),
            format!(
                "Paystack payment for {} - {} month(s) (Ref: {})",
                customer.business_name, cmd.months_paid, cmd.reference
            ),
            today,
        );
        self.revenue.append(&entry).await.map_err(|e| {
            BillingError::settlement_incomplete(
                cmd.customer_id,
                SettlementStage::RevenueLedger,
                e.to_string(),
            )
        })?;

        tracing::info!(
            customer_id = %cmd.customer_id,
            new_end = %new_end,
            months_paid = cmd.months_paid,
            reference = %cmd.reference,
            "payment settled"
        );

        Ok(SettlementOutcome {
            customer_id: cmd.customer_id,
            new_end_date: new_end,
            months_paid: cmd.months_paid,
            websites_unblocked: cascade.websites_affected,
        })
    }
}
