//! HandlePaystackWebhookHandler - verifies and dispatches inbound payment
//! notifications.
//!
//! Signature verification runs over the raw request bytes before anything
//! is parsed, and a failure rejects the request before settlement logic is
//! reached (fail closed). Event types other than `charge.success` are
//! acknowledged without action so the provider does not storm retries.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::billing::{BillingError, PaystackWebhookVerifier};
use crate::domain::foundation::{CustomerId, Timestamp};

use super::settle_payment::{SettlePaymentCommand, SettlePaymentHandler};

/// Command carrying the raw webhook request.
#[derive(Debug, Clone)]
pub struct HandlePaystackWebhookCommand {
    /// Request body exactly as received.
    pub payload: Vec<u8>,
    /// Value of the `x-paystack-signature` header.
    pub signature: String,
    pub now: Timestamp,
}

/// Result of webhook processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaystackWebhookOutcome {
    /// Payment applied to the subscription.
    Settled {
        customer_id: CustomerId,
        new_end_date: NaiveDate,
        months_paid: u32,
    },
    /// Event acknowledged but not handled.
    NotHandled { event: String },
}

pub struct HandlePaystackWebhookHandler {
    verifier: PaystackWebhookVerifier,
    settle_payment: Arc<SettlePaymentHandler>,
}

impl HandlePaystackWebhookHandler {
    pub fn new(
        verifier: PaystackWebhookVerifier,
        settle_payment: Arc<SettlePaymentHandler>,
    ) -> Self {
        Self {
            verifier,
            settle_payment,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandlePaystackWebhookCommand,
    ) -> Result<PaystackWebhookOutcome, BillingError> {
        let event = self
            .verifier
            .verify_and_parse(&cmd.payload, &cmd.signature)?;

        if !event.is_charge_success() {
            tracing::debug!(event = %event.event, "webhook event not handled");
            return Ok(PaystackWebhookOutcome::NotHandled { event: event.event });
        }

        let metadata = event.data.metadata.as_ref().ok_or_else(|| {
            BillingError::validation("metadata", "charge.success event carries no metadata")
        })?;

        let customer_id: CustomerId = metadata
            .customer_id
            .as_deref()
            .ok_or_else(|| BillingError::validation("customer_id", "missing in metadata"))?
            .parse()
            .map_err(|_| BillingError::validation("customer_id", "not a valid identifier"))?;

        let months_paid = metadata.months_paid_or_default();

        let outcome = self
            .settle_payment
            .handle(SettlePaymentCommand {
                customer_id,
                amount: event.data.amount,
                months_paid,
                reference: event.data.reference.clone(),
                now: cmd.now,
            })
            .await?;

        Ok(PaystackWebhookOutcome::Settled {
            customer_id,
            new_end_date: outcome.new_end_date,
            months_paid,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::billing::{
        compute_test_signature, Customer, DeactivationPolicy, RevenueEntry,
    };
    use crate::domain::foundation::DomainError;
    use crate::ports::{
        AccessControlStore, CascadeReport, CustomerRepository, RevenueLedger,
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    const TEST_SECRET: &str = "sk_test_webhook_secret_12345";

    // ════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════

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
            id: &CustomerId,
            new_end: NaiveDate,
            now: Timestamp,
        ) -> Result<(), DomainError> {
            let mut customers = self.customers.lock().unwrap();
            let customer = customers
                .iter_mut()
                .find(|c| &c.id == id)
                .ok_or_else(|| DomainError::database("missing customer"))?;
            customer.settle(new_end, now);
            Ok(())
        }
    }

    struct NoopAccessControlStore;

    #[async_trait]
    impl AccessControlStore for NoopAccessControlStore {
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
            _customer_id: &CustomerId,
            _now: Timestamp,
        ) -> Result<CascadeReport, DomainError> {
            Ok(CascadeReport::default())
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

    struct MockRevenueLedger {
        entries: Mutex<Vec<RevenueEntry>>,
    }

    #[async_trait]
    impl RevenueLedger for MockRevenueLedger {
        async fn append(&self, entry: &RevenueEntry) -> Result<(), DomainError> {
            self.entries.lock().unwrap().push(entry.clone());
            Ok(())
        }

        async fn list_by_client(
            &self,
            client_id: &CustomerId,
        ) -> Result<Vec<RevenueEntry>, DomainError> {
            Ok(self
                .entries
                .lock()
                .unwrap()
                .iter()
                .filter(|e| &e.client_id == client_id)
                .cloned()
                .collect())
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════

    fn test_customer() -> Customer {
        Customer::create(
            CustomerId::new(),
            "Acme Bakery",
            "owner@acmebakery.test",
            "+15550001111",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            5_000,
            Timestamp::now(),
        )
        .unwrap()
    }

    struct Fixture {
        handler: HandlePaystackWebhookHandler,
        repo: Arc<MockCustomerRepository>,
        ledger: Arc<MockRevenueLedger>,
    }

    fn fixture_with(customer: Customer) -> Fixture {
        let repo = Arc::new(MockCustomerRepository {
            customers: Mutex::new(vec![customer]),
        });
        let ledger = Arc::new(MockRevenueLedger {
            entries: Mutex::new(Vec::new()),
        });
        let settle = Arc::new(SettlePaymentHandler::new(
            repo.clone(),
            Arc::new(NoopAccessControlStore),
            ledger.clone(),
        ));
        Fixture {
            handler: HandlePaystackWebhookHandler::new(
                PaystackWebhookVerifier::new(TEST_SECRET),
                settle,
            ),
            repo,
            ledger,
        }
    }

    fn charge_payload(customer_id: &str, months_paid: serde_json::Value) -> Vec<u8> {
        serde_json::json!({
            "event": "charge.success",
            "data": {
                "amount": 500000,
                "reference": "PSK_ref_123",
                "metadata": {
                    "customer_id": customer_id,
                    "business_name": "Acme Bakery",
                    "months_paid": months_paid
                }
            }
        })
        .to_string()
        .into_bytes()
    }

    fn signed_command(payload: Vec<u8>) -> HandlePaystackWebhookCommand {
        let signature = compute_test_signature(TEST_SECRET, &payload);
        HandlePaystackWebhookCommand {
            payload,
            signature,
            now: Timestamp::now(),
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Happy Path Tests
    // ════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn charge_success_settles_the_customer() {
        let customer = test_customer();
        let id = customer.id;
        let fixture = fixture_with(customer);

        let payload = charge_payload(&id.to_string(), serde_json::json!(2));
        let outcome = fixture.handler.handle(signed_command(payload)).await.unwrap();

        match outcome {
            PaystackWebhookOutcome::Settled {
                customer_id,
                months_paid,
                ..
            } => {
                assert_eq!(customer_id, id);
                assert_eq!(months_paid, 2);
            }
            other => panic!("expected Settled, got {:?}", other),
        }
        assert_eq!(fixture.ledger.entries.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn months_paid_defaults_to_one_when_absent() {
        let customer = test_customer();
        let id = customer.id;
        let fixture = fixture_with(customer);

        let payload = serde_json::json!({
            "event": "charge.success",
            "data": {
                "amount": 500000,
                "reference": "PSK_ref_123",
                "metadata": { "customer_id": id.to_string() }
            }
        })
        .to_string()
        .into_bytes();

        let outcome = fixture.handler.handle(signed_command(payload)).await.unwrap();
        assert!(matches!(
            outcome,
            PaystackWebhookOutcome::Settled { months_paid: 1, .. }
        ));
    }

    #[tokio::test]
    async fn stringly_typed_months_paid_is_accepted() {
        let customer = test_customer();
        let id = customer.id;
        let fixture = fixture_with(customer);

        let payload = charge_payload(&id.to_string(), serde_json::json!("3"));
        let outcome = fixture.handler.handle(signed_command(payload)).await.unwrap();

        assert!(matches!(
            outcome,
            PaystackWebhookOutcome::Settled { months_paid: 3, .. }
        ));
    }

    #[tokio::test]
    async fn non_charge_events_are_acknowledged_not_processed() {
        let customer = test_customer();
        let fixture = fixture_with(customer);

        let payload = serde_json::json!({
            "event": "transfer.success",
            "data": { "amount": 1000, "reference": "TRF_1" }
        })
        .to_string()
        .into_bytes();

        let outcome = fixture.handler.handle(signed_command(payload)).await.unwrap();

        assert_eq!(
            outcome,
            PaystackWebhookOutcome::NotHandled {
                event: "transfer.success".to_string()
            }
        );
        assert!(fixture.ledger.entries.lock().unwrap().is_empty());
    }

    // ════════════════════════════════════════════════════════════════════════
    // Rejection Tests
    // ════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn tampered_body_is_rejected_with_no_side_effects() {
        let customer = test_customer();
        let id = customer.id;
        let fixture = fixture_with(customer);

        let payload = charge_payload(&id.to_string(), serde_json::json!(1));
        let signature = compute_test_signature(TEST_SECRET, &payload);

        let mut tampered = payload;
        let pos = tampered.len() - 5;
        tampered[pos] ^= 0x01;

        let result = fixture
            .handler
            .handle(HandlePaystackWebhookCommand {
                payload: tampered,
                signature,
                now: Timestamp::now(),
            })
            .await;

        assert_eq!(result.unwrap_err(), BillingError::InvalidWebhookSignature);
        // No customer mutated, no revenue recorded.
        let stored = fixture.repo.find_by_id(&id).await.unwrap().unwrap();
        assert!(stored.subscription_end_date.is_none());
        assert!(fixture.ledger.entries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_customer_id_is_a_validation_error() {
        let fixture = fixture_with(test_customer());

        let payload = serde_json::json!({
            "event": "charge.success",
            "data": {
                "amount": 500000,
                "reference": "PSK_ref_123",
                "metadata": { "business_name": "Acme Bakery" }
            }
        })
        .to_string()
        .into_bytes();

        let result = fixture.handler.handle(signed_command(payload)).await;

        assert!(matches!(
            result,
            Err(BillingError::ValidationFailed { ref field, .. }) if field == "customer_id"
        ));
    }

    #[tokio::test]
    async fn malformed_customer_id_is_a_validation_error() {
        let fixture = fixture_with(test_customer());

        let payload = charge_payload("definitely-not-a-uuid", serde_json::json!(1));
        let result = fixture.handler.handle(signed_command(payload)).await;

        assert!(matches!(
            result,
            Err(BillingError::ValidationFailed { ref field, .. }) if field == "customer_id"
        ));
    }

    #[tokio::test]
    async fn unknown_customer_id_is_not_found() {
        let fixture = fixture_with(test_customer());

        let stranger = CustomerId::new();
        let payload = charge_payload(&stranger.to_string(), serde_json::json!(1));
        let result = fixture.handler.handle(signed_command(payload)).await;

        assert_eq!(result.unwrap_err(), BillingError::CustomerNotFound(stranger));
    }
}
