//! HTTP handlers for the public API.
//!
//! Connects Axum routes to the application layer command/query handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use subtle::ConstantTimeEq;
use uuid::Uuid;

use crate::application::handlers::access::{
    BlockCustomerCommand, BlockCustomerHandler, CheckDomainAccessHandler, CheckDomainAccessQuery,
    UnblockCustomerCommand, UnblockCustomerHandler,
};
use crate::application::handlers::killswitch::{
    ActivateKillSwitchCommand, ActivateKillSwitchHandler, DeactivateKillSwitchCommand,
    DeactivateKillSwitchHandler,
};
use crate::application::handlers::revenue::{
    RecordManualRevenueCommand, RecordManualRevenueHandler,
};
use crate::application::handlers::settlement::{
    HandlePaystackWebhookCommand, HandlePaystackWebhookHandler, PaystackWebhookOutcome,
    SettlePaymentHandler,
};
use crate::application::handlers::support::{
    SubmitSupportMessageCommand, SubmitSupportMessageHandler,
};
use crate::application::handlers::sweep::{
    CheckSubscriptionStatusHandler, CheckSubscriptionStatusQuery, RunExpirySweepCommand,
    RunExpirySweepHandler,
};
use crate::config::{SecurityConfig, SweepConfig};
use crate::domain::billing::{BillingError, PaystackWebhookVerifier};
use crate::domain::foundation::{CustomerId, Timestamp};
use crate::ports::{
    AccessControlStore, CustomerRepository, KillSwitchStore, RevenueLedger, SupportMessageStore,
    WebsiteRepository,
};

use super::dto::{
    ActivateKillSwitchRequest, BlockCustomerRequest, CascadeResponse, CronSweepResponse,
    ErrorResponse, KillSwitchQueryParams, KillSwitchQueryResponse, ManualRevenueRequest,
    ManualRevenueResponse, SubscriptionStatusResponse, SupportMessageRequest,
    SupportMessageResponse, WebhookAckResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════

/// Shared application state with Arc-wrapped dependencies.
#[derive(Clone)]
pub struct AppState {
    pub customers: Arc<dyn CustomerRepository>,
    pub websites: Arc<dyn WebsiteRepository>,
    pub access_control: Arc<dyn AccessControlStore>,
    pub revenue: Arc<dyn RevenueLedger>,
    pub kill_switch: Arc<dyn KillSwitchStore>,
    pub support_messages: Arc<dyn SupportMessageStore>,
    pub security: SecurityConfig,
    pub sweep: SweepConfig,
}

impl AppState {
    /// Create handlers on demand from the shared state.
    pub fn sweep_handler(&self) -> RunExpirySweepHandler {
        RunExpirySweepHandler::new(self.customers.clone(), self.access_control.clone())
    }

    pub fn subscription_status_handler(&self) -> CheckSubscriptionStatusHandler {
        CheckSubscriptionStatusHandler::new(self.customers.clone())
    }

    pub fn domain_access_handler(&self) -> CheckDomainAccessHandler {
        CheckDomainAccessHandler::new(self.websites.clone(), self.kill_switch.clone())
    }

    pub fn webhook_handler(&self) -> HandlePaystackWebhookHandler {
        let settle = Arc::new(SettlePaymentHandler::new(
            self.customers.clone(),
            self.access_control.clone(),
            self.revenue.clone(),
        ));
        HandlePaystackWebhookHandler::new(
            PaystackWebhookVerifier::new(self.security.paystack_webhook_secret.clone()),
            settle,
        )
    }

    pub fn support_handler(&self) -> SubmitSupportMessageHandler {
        SubmitSupportMessageHandler::new(self.support_messages.clone())
    }

    pub fn block_handler(&self) -> BlockCustomerHandler {
        BlockCustomerHandler::new(self.customers.clone(), self.access_control.clone())
    }

    pub fn unblock_handler(&self) -> UnblockCustomerHandler {
        UnblockCustomerHandler::new(self.customers.clone(), self.access_control.clone())
    }

    pub fn activate_kill_switch_handler(&self) -> ActivateKillSwitchHandler {
        ActivateKillSwitchHandler::new(self.kill_switch.clone(), self.access_control.clone())
    }

    pub fn deactivate_kill_switch_handler(&self) -> DeactivateKillSwitchHandler {
        DeactivateKillSwitchHandler::new(self.kill_switch.clone(), self.access_control.clone())
    }

    pub fn manual_revenue_handler(&self) -> RecordManualRevenueHandler {
        RecordManualRevenueHandler::new(self.customers.clone(), self.revenue.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Authentication Helpers
// ════════════════════════════════════════════════════════════════════════════

/// Compares a presented secret against the expected one in constant time.
fn secrets_match(presented: &str, expected: &str) -> bool {
    presented.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// Checks an `Authorization: Bearer <token>` header against a secret.
fn require_bearer(headers: &HeaderMap, expected: &str) -> Result<(), ApiError> {
    let presented = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(ApiError(BillingError::Unauthorized))?;

    if !secrets_match(presented, expected) {
        return Err(ApiError(BillingError::Unauthorized));
    }
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Public Endpoints
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/cron/deactivate - run the expiry sweep (cron trigger).
pub async fn run_cron_deactivation(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    require_bearer(&headers, &state.security.cron_secret)?;

    let now = Timestamp::now();
    let report = state
        .sweep_handler()
        .handle(RunExpirySweepCommand {
            today: now.date(),
            now,
        })
        .await?;

    Ok(Json(CronSweepResponse::from_report(&report, now)))
}

/// GET /api/killswitch - access query from client websites.
pub async fn killswitch_query(
    State(state): State<AppState>,
    Query(params): Query<KillSwitchQueryParams>,
) -> Result<impl IntoResponse, ApiError> {
    let api_key = params.api_key.unwrap_or_default();
    if !secrets_match(&api_key, &state.security.killswitch_api_key) {
        return Err(ApiError(BillingError::Unauthorized));
    }

    let domain = params
        .domain
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| {
            ApiError(BillingError::validation("domain", "Domain parameter is required"))
        })?;

    let access = state
        .domain_access_handler()
        .handle(CheckDomainAccessQuery { domain })
        .await?;

    Ok(Json(KillSwitchQueryResponse {
        blocked: access.blocked,
        reason: access.reason,
        timestamp: Timestamp::now(),
        domain: access.domain,
        global_kill_switch: access.global_kill_switch,
        website_blocked: access.website_blocked,
    }))
}

/// POST /api/webhooks/paystack - payment provider notifications.
///
/// The body is taken as raw bytes: the signature covers the payload
/// exactly as received.
pub async fn paystack_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let signature = headers
        .get("x-paystack-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError(BillingError::InvalidWebhookSignature))?;

    let outcome = state
        .webhook_handler()
        .handle(HandlePaystackWebhookCommand {
            payload: body.to_vec(),
            signature: signature.to_string(),
            now: Timestamp::now(),
        })
        .await?;

    let ack = match outcome {
        PaystackWebhookOutcome::Settled {
            new_end_date,
            months_paid,
            ..
        } => WebhookAckResponse::settled(new_end_date, months_paid),
        PaystackWebhookOutcome::NotHandled { .. } => WebhookAckResponse::not_handled(),
    };

    Ok(Json(ack))
}

/// POST /api/support-message - ticket intake from client sites.
pub async fn submit_support_message(
    State(state): State<AppState>,
    Json(request): Json<SupportMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(domain), Some(message)) = (request.domain, request.message) else {
        return Err(ApiError(BillingError::validation(
            "domain",
            "Domain and message are required",
        )));
    };

    let message_id = state
        .support_handler()
        .handle(SubmitSupportMessageCommand {
            domain,
            message,
            email: request.email,
            user_agent: request.user_agent,
            page_url: request.url,
            timestamp: request.timestamp,
            now: Timestamp::now(),
        })
        .await?;

    Ok(Json(SupportMessageResponse {
        success: true,
        message_id: *message_id.as_uuid(),
        message: "Support message received successfully".to_string(),
    }))
}

// ════════════════════════════════════════════════════════════════════════════
// Admin Endpoints
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/admin/customers/:id/block
pub async fn admin_block_customer(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(request): Json<BlockCustomerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_bearer(&headers, &state.security.admin_token)?;

    let report = state
        .block_handler()
        .handle(BlockCustomerCommand {
            customer_id: CustomerId::from_uuid(id),
            reason: request.reason,
            now: Timestamp::now(),
        })
        .await?;

    Ok(Json(CascadeResponse::from(report)))
}

/// POST /api/admin/customers/:id/unblock
pub async fn admin_unblock_customer(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    require_bearer(&headers, &state.security.admin_token)?;

    let report = state
        .unblock_handler()
        .handle(UnblockCustomerCommand {
            customer_id: CustomerId::from_uuid(id),
            now: Timestamp::now(),
        })
        .await?;

    Ok(Json(CascadeResponse::from(report)))
}

/// POST /api/admin/killswitch/activate
pub async fn admin_activate_kill_switch(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Option<Json<ActivateKillSwitchRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    require_bearer(&headers, &state.security.admin_token)?;

    let reason = request.and_then(|Json(r)| r.reason);
    let report = state
        .activate_kill_switch_handler()
        .handle(ActivateKillSwitchCommand {
            reason,
            now: Timestamp::now(),
        })
        .await?;

    Ok(Json(CascadeResponse::from(report)))
}

/// POST /api/admin/killswitch/deactivate
pub async fn admin_deactivate_kill_switch(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    require_bearer(&headers, &state.security.admin_token)?;

    let report = state
        .deactivate_kill_switch_handler()
        .handle(DeactivateKillSwitchCommand {
            policy: state.sweep.deactivation_policy,
            now: Timestamp::now(),
        })
        .await?;

    Ok(Json(CascadeResponse::from(report)))
}

/// GET /api/admin/subscriptions/status - read-only expiry report.
pub async fn admin_subscription_status(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    require_bearer(&headers, &state.security.admin_token)?;

    let report = state
        .subscription_status_handler()
        .handle(CheckSubscriptionStatusQuery {
            today: Timestamp::now().date(),
        })
        .await?;

    Ok(Json(SubscriptionStatusResponse::from(&report)))
}

/// POST /api/admin/revenue - manual one-time ledger entry.
pub async fn admin_record_revenue(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ManualRevenueRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_bearer(&headers, &state.security.admin_token)?;

    let entry_id = state
        .manual_revenue_handler()
        .handle(RecordManualRevenueCommand {
            client_id: CustomerId::from_uuid(request.client_id),
            amount: request.amount,
            description: request.description,
            now: Timestamp::now(),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ManualRevenueResponse {
            success: true,
            entry_id: *entry_id.as_uuid(),
        }),
    ))
}

// ════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════

/// API error type that converts billing errors to HTTP responses.
pub struct ApiError(pub BillingError);

impl From<BillingError> for ApiError {
    fn from(err: BillingError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            BillingError::CustomerNotFound(_) => StatusCode::NOT_FOUND,
            BillingError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            BillingError::Unauthorized | BillingError::InvalidWebhookSignature => {
                StatusCode::UNAUTHORIZED
            }
            BillingError::InvalidState { .. } => StatusCode::CONFLICT,
            BillingError::InconsistentCascade { .. }
            | BillingError::SettlementIncomplete { .. }
            | BillingError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let body = ErrorResponse::new(self.0.code().to_string(), self.0.message());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::billing::{
        compute_test_signature, Customer, DeactivationPolicy, KillSwitch, RevenueEntry,
        SupportMessage, Website,
    };
    use crate::domain::foundation::DomainError;
    use crate::ports::CascadeReport;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    // ════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════

    #[derive(Default)]
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
            id: &CustomerId,
            today: NaiveDate,
            now: Timestamp,
        ) -> Result<bool, DomainError> {
            let mut customers = self.customers.lock().unwrap();
            let customer = customers
                .iter_mut()
                .find(|c| &c.id == id)
                .ok_or_else(|| DomainError::database("missing customer"))?;
            if customer.is_active && customer.period_end() <= today {
                customer.deactivate(now);
                Ok(true)
            } else {
                Ok(false)
            }
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

    #[derive(Default)]
    struct MockWebsiteRepository {
        websites: Mutex<Vec<Website>>,
    }

    #[async_trait]
    impl WebsiteRepository for MockWebsiteRepository {
        async fn save(&self, website: &Website) -> Result<(), DomainError> {
            self.websites.lock().unwrap().push(website.clone());
            Ok(())
        }

        async fn find_by_domain(&self, domain: &str) -> Result<Option<Website>, DomainError> {
            Ok(self
                .websites
                .lock()
                .unwrap()
                .iter()
                .find(|w| w.domain == domain)
                .cloned())
        }

        async fn list_by_customer(
            &self,
            customer_id: &CustomerId,
        ) -> Result<Vec<Website>, DomainError> {
            Ok(self
                .websites
                .lock()
                .unwrap()
                .iter()
                .filter(|w| &w.customer_id == customer_id)
                .cloned()
                .collect())
        }
    }

    #[derive(Default)]
    struct MockAccessControlStore;

    #[async_trait]
    impl AccessControlStore for MockAccessControlStore {
        async fn block_customer_cascade(
            &self,
            _customer_id: &CustomerId,
            _reason: &str,
            _now: Timestamp,
        ) -> Result<CascadeReport, DomainError> {
            Ok(CascadeReport {
                customers_affected: 1,
                websites_affected: 1,
            })
        }

        async fn unblock_customer_cascade(
            &self,
            _customer_id: &CustomerId,
            _now: Timestamp,
        ) -> Result<CascadeReport, DomainError> {
            Ok(CascadeReport {
                customers_affected: 1,
                websites_affected: 1,
            })
        }

        async fn block_all_active(
            &self,
            _reason: &str,
            _now: Timestamp,
        ) -> Result<CascadeReport, DomainError> {
            Ok(CascadeReport {
                customers_affected: 2,
                websites_affected: 3,
            })
        }

        async fn unblock_all_blocked(
            &self,
            _policy: DeactivationPolicy,
            _now: Timestamp,
        ) -> Result<CascadeReport, DomainError> {
            Ok(CascadeReport {
                customers_affected: 2,
                websites_affected: 3,
            })
        }
    }

    #[derive(Default)]
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

    #[derive(Default)]
    struct MockKillSwitchStore {
        records: Mutex<Vec<KillSwitch>>,
    }

    #[async_trait]
    impl KillSwitchStore for MockKillSwitchStore {
        async fn current(&self) -> Result<Option<KillSwitch>, DomainError> {
            Ok(self.records.lock().unwrap().last().cloned())
        }

        async fn append(&self, record: &KillSwitch) -> Result<(), DomainError> {
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockSupportMessageStore {
        messages: Mutex<Vec<SupportMessage>>,
    }

    #[async_trait]
    impl SupportMessageStore for MockSupportMessageStore {
        async fn insert(&self, message: &SupportMessage) -> Result<(), DomainError> {
            self.messages.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════

    const CRON_SECRET: &str = "cron-secret-0123456789ab";
    const API_KEY: &str = "ks-api-key-0123456789ab";
    const ADMIN_TOKEN: &str = "admin-token-0123456789ab";
    const WEBHOOK_SECRET: &str = "sk_test_webhook_secret";

    fn test_state() -> AppState {
        AppState {
            customers: Arc::new(MockCustomerRepository::default()),
            websites: Arc::new(MockWebsiteRepository::default()),
            access_control: Arc::new(MockAccessControlStore),
            revenue: Arc::new(MockRevenueLedger::default()),
            kill_switch: Arc::new(MockKillSwitchStore::default()),
            support_messages: Arc::new(MockSupportMessageStore::default()),
            security: SecurityConfig {
                cron_secret: CRON_SECRET.to_string(),
                killswitch_api_key: API_KEY.to_string(),
                admin_token: ADMIN_TOKEN.to_string(),
                paystack_webhook_secret: WEBHOOK_SECRET.to_string(),
            },
            sweep: SweepConfig::default(),
        }
    }

    fn state_with_customer(customer: Customer) -> AppState {
        let repo = MockCustomerRepository {
            customers: Mutex::new(vec![customer]),
        };
        AppState {
            customers: Arc::new(repo),
            ..test_state()
        }
    }

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

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::AUTHORIZATION,
            format!("Bearer {}", token).parse().unwrap(),
        );
        headers
    }

    // ════════════════════════════════════════════════════════════════════════
    // Cron Endpoint Tests
    // ════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn cron_endpoint_requires_bearer_token() {
        let result = run_cron_deactivation(State(test_state()), HeaderMap::new()).await;
        let response = result.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn cron_endpoint_rejects_wrong_token() {
        let result =
            run_cron_deactivation(State(test_state()), bearer("wrong-token-000000")).await;
        assert_eq!(result.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn cron_endpoint_runs_sweep_with_valid_token() {
        let result = run_cron_deactivation(State(test_state()), bearer(CRON_SECRET)).await;
        assert_eq!(result.into_response().status(), StatusCode::OK);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Kill-Switch Query Tests
    // ════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn killswitch_query_rejects_bad_api_key() {
        let params = KillSwitchQueryParams {
            domain: Some("acmebakery.test".to_string()),
            api_key: Some("wrong".to_string()),
        };

        let result = killswitch_query(State(test_state()), Query(params)).await;
        assert_eq!(result.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn killswitch_query_requires_domain() {
        let params = KillSwitchQueryParams {
            domain: None,
            api_key: Some(API_KEY.to_string()),
        };

        let result = killswitch_query(State(test_state()), Query(params)).await;
        assert_eq!(result.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn killswitch_query_answers_for_unknown_domain() {
        let params = KillSwitchQueryParams {
            domain: Some("unknown.test".to_string()),
            api_key: Some(API_KEY.to_string()),
        };

        let result = killswitch_query(State(test_state()), Query(params)).await;
        assert_eq!(result.into_response().status(), StatusCode::OK);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Webhook Endpoint Tests
    // ════════════════════════════════════════════════════════════════════════

    fn charge_body(customer_id: &CustomerId) -> Vec<u8> {
        serde_json::json!({
            "event": "charge.success",
            "data": {
                "amount": 500000,
                "reference": "PSK_ref_123",
                "metadata": {
                    "customer_id": customer_id.to_string(),
                    "business_name": "Acme Bakery",
                    "months_paid": 1
                }
            }
        })
        .to_string()
        .into_bytes()
    }

    fn signature_headers(body: &[u8]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-paystack-signature",
            compute_test_signature(WEBHOOK_SECRET, body).parse().unwrap(),
        );
        headers
    }

    #[tokio::test]
    async fn webhook_without_signature_header_is_unauthorized() {
        let body = charge_body(&CustomerId::new());
        let result = paystack_webhook(
            State(test_state()),
            HeaderMap::new(),
            axum::body::Bytes::from(body),
        )
        .await;

        assert_eq!(result.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn webhook_with_bad_signature_is_unauthorized() {
        let body = charge_body(&CustomerId::new());
        let mut headers = HeaderMap::new();
        headers.insert("x-paystack-signature", "00ff".repeat(32).parse().unwrap());

        let result =
            paystack_webhook(State(test_state()), headers, axum::body::Bytes::from(body)).await;

        assert_eq!(result.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn webhook_with_valid_signature_settles() {
        let customer = test_customer();
        let id = customer.id;
        let state = state_with_customer(customer);

        let body = charge_body(&id);
        let headers = signature_headers(&body);

        let result = paystack_webhook(State(state), headers, axum::body::Bytes::from(body)).await;

        assert_eq!(result.into_response().status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn webhook_acknowledges_unhandled_event_types() {
        let body = serde_json::json!({
            "event": "transfer.success",
            "data": { "amount": 1000, "reference": "TRF_1" }
        })
        .to_string()
        .into_bytes();
        let headers = signature_headers(&body);

        let result = paystack_webhook(
            State(test_state()),
            headers,
            axum::body::Bytes::from(body),
        )
        .await;

        // Unhandled events return 200 so the provider does not retry.
        assert_eq!(result.into_response().status(), StatusCode::OK);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Support Message Tests
    // ════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn support_message_requires_domain_and_message() {
        let request = SupportMessageRequest {
            domain: Some("acmebakery.test".to_string()),
            message: None,
            email: None,
            user_agent: None,
            url: None,
            timestamp: None,
        };

        let result = submit_support_message(State(test_state()), Json(request)).await;
        assert_eq!(result.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn support_message_is_accepted() {
        let request = SupportMessageRequest {
            domain: Some("acmebakery.test".to_string()),
            message: Some("Our site shows a notice".to_string()),
            email: None,
            user_agent: None,
            url: None,
            timestamp: None,
        };

        let result = submit_support_message(State(test_state()), Json(request)).await;
        assert_eq!(result.into_response().status(), StatusCode::OK);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Admin Endpoint Tests
    // ════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn admin_block_requires_token() {
        let result = admin_block_customer(
            State(test_state()),
            HeaderMap::new(),
            Path(Uuid::new_v4()),
            Json(BlockCustomerRequest {
                reason: "Overdue".to_string(),
            }),
        )
        .await;

        assert_eq!(result.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn admin_block_unknown_customer_is_404() {
        let result = admin_block_customer(
            State(test_state()),
            bearer(ADMIN_TOKEN),
            Path(Uuid::new_v4()),
            Json(BlockCustomerRequest {
                reason: "Overdue".to_string(),
            }),
        )
        .await;

        assert_eq!(result.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn admin_block_existing_customer_succeeds() {
        let customer = test_customer();
        let id = *customer.id.as_uuid();
        let state = state_with_customer(customer);

        let result = admin_block_customer(
            State(state),
            bearer(ADMIN_TOKEN),
            Path(id),
            Json(BlockCustomerRequest {
                reason: "Overdue".to_string(),
            }),
        )
        .await;

        assert_eq!(result.into_response().status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn admin_kill_switch_round_trip() {
        let state = test_state();

        let activate = admin_activate_kill_switch(
            State(state.clone()),
            bearer(ADMIN_TOKEN),
            Some(Json(ActivateKillSwitchRequest { reason: None })),
        )
        .await;
        assert_eq!(activate.into_response().status(), StatusCode::OK);

        let current = state.kill_switch.current().await.unwrap().unwrap();
        assert!(current.is_active);

        let deactivate =
            admin_deactivate_kill_switch(State(state.clone()), bearer(ADMIN_TOKEN)).await;
        assert_eq!(deactivate.into_response().status(), StatusCode::OK);

        let current = state.kill_switch.current().await.unwrap().unwrap();
        assert!(!current.is_active);
    }

    #[tokio::test]
    async fn admin_subscription_status_requires_token() {
        let result = admin_subscription_status(State(test_state()), HeaderMap::new()).await;
        assert_eq!(result.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn admin_revenue_entry_is_created() {
        let customer = test_customer();
        let id = *customer.id.as_uuid();
        let state = state_with_customer(customer);

        let result = admin_record_revenue(
            State(state),
            bearer(ADMIN_TOKEN),
            Json(ManualRevenueRequest {
                client_id: id,
                amount: 2_500,
                description: "Logo redesign".to_string(),
            }),
        )
        .await;

        assert_eq!(result.into_response().status(), StatusCode::CREATED);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Error Mapping Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn api_error_maps_not_found_to_404() {
        let err = ApiError(BillingError::customer_not_found(CustomerId::new()));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn api_error_maps_validation_to_400() {
        let err = ApiError(BillingError::validation("domain", "required"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_maps_unauthorized_to_401() {
        let err = ApiError(BillingError::unauthorized());
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn api_error_maps_bad_signature_to_401() {
        let err = ApiError(BillingError::invalid_webhook_signature());
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn api_error_maps_invalid_state_to_409() {
        let err = ApiError(BillingError::invalid_state("Blocked", "block"));
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn api_error_maps_persistence_to_500() {
        let err = ApiError(BillingError::persistence("connection refused"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn api_error_maps_settlement_incomplete_to_500() {
        let err = ApiError(BillingError::settlement_incomplete(
            CustomerId::new(),
            crate::domain::billing::SettlementStage::RevenueLedger,
            "insert failed",
        ));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn secrets_match_is_exact() {
        assert!(secrets_match("token-a", "token-a"));
        assert!(!secrets_match("token-a", "token-b"));
        assert!(!secrets_match("token-a", "token-a-longer"));
    }
}
