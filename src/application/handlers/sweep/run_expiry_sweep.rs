//! RunExpirySweepHandler - batch classification and deactivation of
//! customers by subscription expiry.
//!
//! Safe to run repeatedly (daily cron or manual trigger). Deactivation
//! goes through the repository's conditional guard, so a second run - or a
//! run racing a payment settlement - never double-blocks anyone.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::billing::{BillingError, Customer, ExpiryStatus};
use crate::domain::foundation::{CustomerId, Timestamp};
use crate::ports::{AccessControlStore, CustomerRepository};

/// Reason stamped onto customers blocked by the sweep.
const EXPIRED_REASON: &str = "Subscription expired";

/// Command to run one expiry sweep.
#[derive(Debug, Clone)]
pub struct RunExpirySweepCommand {
    /// Reference date for expiry classification.
    pub today: NaiveDate,
    /// Instant stamped onto block transitions.
    pub now: Timestamp,
}

/// A customer whose billing period has ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiredCustomer {
    pub customer_id: CustomerId,
    pub business_name: String,
    pub email: String,
    pub phone: String,
    pub subscription_end_date: NaiveDate,
    pub days_overdue: i64,
}

/// A customer whose billing period ends within the warning window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiringCustomer {
    pub customer_id: CustomerId,
    pub business_name: String,
    pub email: String,
    pub phone: String,
    pub subscription_end_date: NaiveDate,
    pub days_remaining: i64,
}

/// A per-customer failure that did not abort the sweep.
#[derive(Debug, Clone)]
pub struct SweepRecordError {
    pub customer_id: CustomerId,
    pub message: String,
}

/// Outcome of one sweep run. Always produced, even on partial failure.
#[derive(Debug, Clone, Default)]
pub struct SweepReport {
    /// Customers actually deactivated by this run.
    pub deactivated: usize,
    /// Every customer past their period end, whether deactivated by this
    /// run or an earlier one.
    pub expired: Vec<ExpiredCustomer>,
    /// Active customers within the warning window. Surfaced read-only for
    /// reminders; never blocked prematurely.
    pub expiring: Vec<ExpiringCustomer>,
    pub errors: Vec<SweepRecordError>,
}

impl SweepReport {
    /// Human-readable summary for the cron response.
    pub fn summary_message(&self) -> String {
        format!(
            "Automatic deactivation completed. {} customers deactivated, {} expiring soon.",
            self.deactivated,
            self.expiring.len()
        )
    }
}

/// Handler scanning all customers and applying expiry transitions.
pub struct RunExpirySweepHandler {
    customers: Arc<dyn CustomerRepository>,
    access_control: Arc<dyn AccessControlStore>,
}

impl RunExpirySweepHandler {
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        access_control: Arc<dyn AccessControlStore>,
    ) -> Self {
        Self {
            customers,
            access_control,
        }
    }

    pub async fn handle(&self, cmd: RunExpirySweepCommand) -> Result<SweepReport, BillingError> {
        let customers = self.customers.list_all().await?;

        let mut report = SweepReport::default();

        for customer in &customers {
            let days = customer.days_remaining(cmd.today);
            match customer.expiry_status(cmd.today) {
                ExpiryStatus::Expired => {
                    report.expired.push(expired_record(customer, days));
                    if customer.is_active {
                        self.deactivate_and_block(customer, &cmd, &mut report).await;
                    }
                }
                ExpiryStatus::ExpiringSoon if customer.is_active => {
                    report.expiring.push(expiring_record(customer, days));
                }
                _ => {}
            }
        }

        tracing::info!(
            deactivated = report.deactivated,
            expired = report.expired.len(),
            expiring = report.expiring.len(),
            errors = report.errors.len(),
            "expiry sweep completed"
        );

        Ok(report)
    }

    /// Deactivates one customer and cascades the block. Failures are
    /// collected per record so the rest of the sweep proceeds.
    async fn deactivate_and_block(
        &self,
        customer: &Customer,
        cmd: &RunExpirySweepCommand,
        report: &mut SweepReport,
    ) {
        let deactivated = match self
            .customers
            .deactivate_if_expired(&customer.id, cmd.today, cmd.now)
            .await
        {
            Ok(flag) => flag,
            Err(e) => {
                tracing::warn!(customer_id = %customer.id, error = %e, "sweep deactivation failed");
                report.errors.push(SweepRecordError {
                    customer_id: customer.id,
                    message: e.to_string(),
                });
                return;
            }
        };

        // Guard missed: a settlement extended the subscription after our
        // snapshot was read. The customer is no longer expired.
        if !deactivated {
            if report.expired.last().map(|r| r.customer_id) == Some(customer.id) {
                report.expired.pop();
            }
            return;
        }

        report.deactivated += 1;

        if let Err(e) = self
            .access_control
            .block_customer_cascade(&customer.id, EXPIRED_REASON, cmd.now)
            .await
        {
            tracing::warn!(customer_id = %customer.id, error = %e, "sweep block cascade failed");
            report.errors.push(SweepRecordError {
                customer_id: customer.id,
                message: e.to_string(),
            });
        }
    }
}

fn expired_record(customer: &Customer, days_remaining: i64) -> ExpiredCustomer {
    ExpiredCustomer {
        customer_id: customer.id,
        business_name: customer.business_name.clone(),
        email: customer.email.clone(),
        phone: customer.phone.clone(),
        subscription_end_date: customer.period_end(),
        days_overdue: -days_remaining,
    }
}

fn expiring_record(customer: &Customer, days_remaining: i64) -> ExpiringCustomer {
    ExpiringCustomer {
        customer_id: customer.id,
        business_name: customer.business_name.clone(),
        email: customer.email.clone(),
        phone: customer.phone.clone(),
        subscription_end_date: customer.period_end(),
        days_remaining,
    }
}
