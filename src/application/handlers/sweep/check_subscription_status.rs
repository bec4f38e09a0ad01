//! CheckSubscriptionStatusHandler - read-only expiry report.
//!
//! Same classification as the sweep, with no state mutation. Backs the
//! dashboard view that shows expiring and expired customers before an
//! operator decides to trigger deactivation.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::billing::{BillingError, ExpiryStatus};
use crate::ports::CustomerRepository;

use super::run_expiry_sweep::{ExpiredCustomer, ExpiringCustomer};

/// Query for the current expiry picture.
#[derive(Debug, Clone)]
pub struct CheckSubscriptionStatusQuery {
    pub today: NaiveDate,
}

/// Read-only classification of the customer book.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionStatusReport {
    pub expired: Vec<ExpiredCustomer>,
    pub expiring: Vec<ExpiringCustomer>,
}

pub struct CheckSubscriptionStatusHandler {
    customers: Arc<dyn CustomerRepository>,
}

impl CheckSubscriptionStatusHandler {
    pub fn new(customers: Arc<dyn CustomerRepository>) -> Self {
        Self { customers }
    }

    pub async fn handle(
        &self,
        query: CheckSubscriptionStatusQuery,
    ) -> Result<SubscriptionStatusReport, BillingError> {
        let customers = self.customers.list_all().await?;

        let mut report = SubscriptionStatusReport::default();
        for customer in &customers {
            let days = customer.days_remaining(query.today);
            match customer.expiry_status(query.today) {
                ExpiryStatus::Expired => report.expired.push(ExpiredCustomer {
                    customer_id: customer.id,
                    business_name: customer.business_name.clone(),
                    email: customer.email.clone(),
                    phone: customer.phone.clone(),
                    subscription_end_date: customer.period_end(),
                    days_overdue: -days,
                }),
                ExpiryStatus::ExpiringSoon if customer.is_active => {
                    report.expiring.push(ExpiringCustomer {
                        customer_id: customer.id,
                        business_name: customer.business_name.clone(),
                        email: customer.email.clone(),
                        phone: customer.phone.clone(),
                        subscription_end_date: customer.period_end(),
                        days_remaining: days,
                    })
                }
                _ => {}
            }
        }

        Ok(report)
    }
}
