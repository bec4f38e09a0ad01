//! UnblockCustomerHandler - manual operator unblock of one customer.

use std::sync::Arc;

use crate::domain::billing::BillingError;
use crate::domain::foundation::{CustomerId, Timestamp};
use crate::ports::{AccessControlStore, CascadeReport, CustomerRepository};

/// Command to unblock a customer and their blocked websites.
#[derive(Debug, Clone)]
pub struct UnblockCustomerCommand {
    pub customer_id: CustomerId,
    pub now: Timestamp,
}

pub struct UnblockCustomerHandler {
    customers: Arc<dyn CustomerRepository>,
    access_control: Arc<dyn AccessControlStore>,
}

impl UnblockCustomerHandler {
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        access_control: Arc<dyn AccessControlStore>,
    ) -> Self {
        Self {
            customers,
            access_control,
        }
    }

    pub async fn handle(&self, cmd: UnblockCustomerCommand) -> Result<CascadeReport, BillingError> {
        self.customers
            .find_by_id(&cmd.customer_id)
            .await?
            .ok_or_else(|| BillingError::customer_not_found(cmd.customer_id))?;

        let report = self
            .access_control
            .unblock_customer_cascade(&cmd.customer_id, cmd.now)
            .await?;

        tracing::info!(
            customer_id = %cmd.customer_id,
            websites = report.websites_affected,
            "customer unblocked"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::billing::{Customer, DeactivationPolicy};
    use crate::domain::foundation::DomainError;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    struct MockCustomerRepository {
        customers: Mutex<Vec<Customer>>,
    }

    #[async_trait]
    impl CustomerRepository for MockCustomerRepository {
        async fn save(&self, customer: &Customer) -> Result<(), DomainError> {
            self.customers.lock().unwrap().push(customer.clone());
            Ok(())
        }

        async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, DomainError> {
            Ok(self
                .customers
                .lock()
                .unwrap()
                .iter()
                .find(|c| &c.id == id)
                .cloned())
        }

        async fn list_all(&self) -> Result<Vec<Customer>, DomainError> {
            Ok(self.customers.lock().unwrap().clone())
        }

        async fn deactivate_if_expired(
            &self,
            _id: &CustomerId,
            _today: NaiveDate,
            _now: Timestamp,
        ) -> Result<bool, DomainError> {
            Ok(false)
        }

        async fn apply_settlement(
            &self,
            _id: &CustomerId,
            _new_end: NaiveDate,
            _now: Timestamp,
        ) -> Result<(), DomainError> {
            Ok(())
        }
    }

    struct MockAccessControlStore {
        unblocks: Mutex<Vec<CustomerId>>,
    }

    #[async_trait]
    impl AccessControlStore for MockAccessControlStore {
        async fn block_customer_cascade(
            &self,
            _customer_id: &CustomerId,
            _reason: &str,
            _now: Timestamp,
        ) -> Result<CascadeReport, DomainError> {
            Ok(CascadeReport::default())
        }

        async fn unblock_customer_cascade(
            &self,
            customer_id: &CustomerId,
            _now: Timestamp,
        ) -> Result<CascadeReport, DomainError> {
            self.unblocks.lock().unwrap().push(*customer_id);
            Ok(CascadeReport {
                customers_affected: 1,
                websites_affected: 2,
            })
        }

        async fn block_all_active(
            &self,
            _reason: &str,
            _now: Timestamp,
        ) -> Result<CascadeReport, DomainError> {
            Ok(CascadeReport::default())
        }

        async fn unblock_all_blocked(
            &self,
            _policy: DeactivationPolicy,
            _now: Timestamp,
        ) -> Result<CascadeReport, DomainError> {
            Ok(CascadeReport::default())
        }
    }

    fn blocked_customer() -> Customer {
        let mut customer = Customer::create(
            CustomerId::new(),
            "Acme Bakery",
            "owner@acmebakery.test",
            "+15550001111",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            5_000,
            Timestamp::now(),
        )
        .unwrap();
        customer.block("Subscription expired", Timestamp::now());
        customer
    }

    #[tokio::test]
    async fn unblocks_existing_customer() {
        let customer = blocked_customer();
        let id = customer.id;
        let repo = Arc::new(MockCustomerRepository {
            customers: Mutex::new(vec![customer]),
        });
        let access = Arc::new(MockAccessControlStore {
            unblocks: Mutex::new(Vec::new()),
        });
        let handler = UnblockCustomerHandler::new(repo, access.clone());

        let report = handler
            .handle(UnblockCustomerCommand {
                customer_id: id,
                now: Timestamp::now(),
            })
            .await
            .unwrap();

        assert_eq!(report.websites_affected, 2);
        assert_eq!(access.unblocks.lock().unwrap().as_slice(), &[id]);
    }

    #[tokio::test]
    async fn unknown_customer_is_not_found() {
        let repo = Arc::new(MockCustomerRepository {
            customers: Mutex::new(vec![]),
        });
        let access = Arc::new(MockAccessControlStore {
            unblocks: Mutex::new(Vec::new()),
        });
        let handler = UnblockCustomerHandler::new(repo, access.clone());

        let id = CustomerId::new();
        let result = handler
            .handle(UnblockCustomerCommand {
                customer_id: id,
                now: Timestamp::now(),
            })
            .await;

        assert_eq!(result.unwrap_err(), BillingError::CustomerNotFound(id));
        assert!(access.unblocks.lock().unwrap().is_empty());
    }
}
