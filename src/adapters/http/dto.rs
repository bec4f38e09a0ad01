//! Request/response DTOs for the public API.
//!
//! Wire field names follow the shapes the client integrations already
//! consume: the kill-switch and support payloads are camelCase, the
//! webhook acknowledgement snake_case.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::handlers::sweep::{
    ExpiredCustomer, ExpiringCustomer, SubscriptionStatusReport, SweepReport,
};
use crate::domain::foundation::Timestamp;
use crate::ports::CascadeReport;

/// Standard error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Cron sweep
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
pub struct CronSweepResponse {
    pub success: bool,
    pub timestamp: Timestamp,
    pub deactivated: usize,
    pub expiring: usize,
    pub message: String,
}

impl CronSweepResponse {
    pub fn from_report(report: &SweepReport, now: Timestamp) -> Self {
        Self {
            success: true,
            timestamp: now,
            deactivated: report.deactivated,
            expiring: report.expiring.len(),
            message: report.summary_message(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Kill-switch query
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
pub struct KillSwitchQueryParams {
    pub domain: Option<String>,
    #[serde(rename = "apiKey")]
    pub api_key: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KillSwitchQueryResponse {
    pub blocked: bool,
    pub reason: String,
    pub timestamp: Timestamp,
    pub domain: String,
    pub global_kill_switch: bool,
    pub website_blocked: bool,
}

// ════════════════════════════════════════════════════════════════════════════
// Payment webhook
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
pub struct WebhookAckResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub months_paid: Option<u32>,
}

impl WebhookAckResponse {
    pub fn settled(end_date: NaiveDate, months_paid: u32) -> Self {
        Self {
            message: "Payment processed successfully".to_string(),
            subscription_end_date: Some(end_date),
            months_paid: Some(months_paid),
        }
    }

    pub fn not_handled() -> Self {
        Self {
            message: "Event received, but not handled".to_string(),
            subscription_end_date: None,
            months_paid: None,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Support messages
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportMessageRequest {
    pub domain: Option<String>,
    pub message: Option<String>,
    pub email: Option<String>,
    pub user_agent: Option<String>,
    pub url: Option<String>,
    pub timestamp: Option<Timestamp>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportMessageResponse {
    pub success: bool,
    pub message_id: Uuid,
    pub message: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Admin: block / unblock / kill switch
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
pub struct BlockCustomerRequest {
    pub reason: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct ActivateKillSwitchRequest {
    pub reason: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CascadeResponse {
    pub success: bool,
    pub customers_affected: u64,
    pub websites_affected: u64,
}

impl From<CascadeReport> for CascadeResponse {
    fn from(report: CascadeReport) -> Self {
        Self {
            success: true,
            customers_affected: report.customers_affected,
            websites_affected: report.websites_affected,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Admin: subscription status report
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
pub struct ExpiringCustomerDto {
    pub customer_id: Uuid,
    pub business_name: String,
    pub email: String,
    pub phone: String,
    pub subscription_end_date: NaiveDate,
    pub days_remaining: i64,
}

impl From<&ExpiringCustomer> for ExpiringCustomerDto {
    fn from(c: &ExpiringCustomer) -> Self {
        Self {
            customer_id: *c.customer_id.as_uuid(),
            business_name: c.business_name.clone(),
            email: c.email.clone(),
            phone: c.phone.clone(),
            subscription_end_date: c.subscription_end_date,
            days_remaining: c.days_remaining,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExpiredCustomerDto {
    pub customer_id: Uuid,
    pub business_name: String,
    pub email: String,
    pub phone: String,
    pub subscription_end_date: NaiveDate,
    pub days_overdue: i64,
}

impl From<&ExpiredCustomer> for ExpiredCustomerDto {
    fn from(c: &ExpiredCustomer) -> Self {
        Self {
            customer_id: *c.customer_id.as_uuid(),
            business_name: c.business_name.clone(),
            email: c.email.clone(),
            phone: c.phone.clone(),
            subscription_end_date: c.subscription_end_date,
            days_overdue: c.days_overdue,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubscriptionStatusResponse {
    pub expiring: Vec<ExpiringCustomerDto>,
    pub expired: Vec<ExpiredCustomerDto>,
}

impl From<&SubscriptionStatusReport> for SubscriptionStatusResponse {
    fn from(report: &SubscriptionStatusReport) -> Self {
        Self {
            expiring: report.expiring.iter().map(Into::into).collect(),
            expired: report.expired.iter().map(Into::into).collect(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Admin: manual revenue
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
pub struct ManualRevenueRequest {
    pub client_id: Uuid,
    /// Amount in cents.
    pub amount: i64,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct ManualRevenueResponse {
    pub success: bool,
    pub entry_id: Uuid,
}
