//! Billing-specific error types.
//!
//! Errors covering the subscription lifecycle, access-control cascades,
//! and payment settlement.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | CustomerNotFound | 404 |
//! | ValidationFailed | 400 |
//! | Unauthorized | 401 |
//! | InvalidWebhookSignature | 401 |
//! | InvalidState | 409 |
//! | InconsistentCascade | 500 |
//! | SettlementIncomplete | 500 |
//! | Persistence | 500 |

use crate::domain::foundation::{CustomerId, DomainError, ErrorCode};

/// Stage of a settlement that failed after access state already moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementStage {
    /// Website cascade-unblock failed; the customer is reactivated but
    /// owned sites may still be blocked.
    WebsiteCascade,
    /// Revenue ledger append failed; access was credited with no matching
    /// ledger entry.
    RevenueLedger,
}

impl SettlementStage {
    fn as_str(&self) -> &'static str {
        match self {
            SettlementStage::WebsiteCascade => "website cascade",
            SettlementStage::RevenueLedger => "revenue ledger",
        }
    }
}

/// Billing-domain errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillingError {
    /// Customer was not found.
    CustomerNotFound(CustomerId),

    /// Required input was missing or invalid.
    ValidationFailed { field: String, message: String },

    /// Bearer token or API key did not match.
    Unauthorized,

    /// Webhook signature verification failed.
    InvalidWebhookSignature,

    /// The entity is in the wrong state for the requested operation.
    InvalidState { current: String, attempted: String },

    /// A customer/website cascade applied only partially.
    InconsistentCascade { customer_id: CustomerId, detail: String },

    /// Settlement moved access state but a later step failed. Money has
    /// already been credited, so the caller must retry or alert rather
    /// than treat the payment as ignored.
    SettlementIncomplete {
        customer_id: CustomerId,
        stage: SettlementStage,
        detail: String,
    },

    /// Underlying store unavailable or a write failed.
    Persistence(String),
}

impl BillingError {
    pub fn customer_not_found(id: CustomerId) -> Self {
        BillingError::CustomerNotFound(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        BillingError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn unauthorized() -> Self {
        BillingError::Unauthorized
    }

    pub fn invalid_webhook_signature() -> Self {
        BillingError::InvalidWebhookSignature
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        BillingError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn inconsistent_cascade(customer_id: CustomerId, detail: impl Into<String>) -> Self {
        BillingError::InconsistentCascade {
            customer_id,
            detail: detail.into(),
        }
    }

    pub fn settlement_incomplete(
        customer_id: CustomerId,
        stage: SettlementStage,
        detail: impl Into<String>,
    ) -> Self {
        BillingError::SettlementIncomplete {
            customer_id,
            stage,
            detail: detail.into(),
        }
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        BillingError::Persistence(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            BillingError::CustomerNotFound(_) => ErrorCode::CustomerNotFound,
            BillingError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            BillingError::Unauthorized => ErrorCode::Unauthorized,
            BillingError::InvalidWebhookSignature => ErrorCode::InvalidSignature,
            BillingError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            BillingError::InconsistentCascade { .. } => ErrorCode::CascadeIncomplete,
            BillingError::SettlementIncomplete { .. } => ErrorCode::CascadeIncomplete,
            BillingError::Persistence(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            BillingError::CustomerNotFound(id) => format!("Customer not found: {}", id),
            BillingError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            BillingError::Unauthorized => "Unauthorized".to_string(),
            BillingError::InvalidWebhookSignature => "Invalid webhook signature".to_string(),
            BillingError::InvalidState { current, attempted } => {
                format!("Cannot {} in {} state", attempted, current)
            }
            BillingError::InconsistentCascade { customer_id, detail } => format!(
                "Cascade for customer {} applied partially: {}",
                customer_id, detail
            ),
            BillingError::SettlementIncomplete {
                customer_id,
                stage,
                detail,
            } => format!(
                "Settlement for customer {} incomplete at {}: {}",
                customer_id,
                stage.as_str(),
                detail
            ),
            BillingError::Persistence(msg) => format!("Storage error: {}", msg),
        }
    }

    /// Whether the caller should retry the operation.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BillingError::Persistence(_) | BillingError::SettlementIncomplete { .. }
        )
    }
}

impl std::fmt::Display for BillingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for BillingError {}

impl From<super::webhook_verifier::WebhookError> for BillingError {
    fn from(err: super::webhook_verifier::WebhookError) -> Self {
        use super::webhook_verifier::WebhookError;
        match err {
            WebhookError::InvalidSignature => BillingError::InvalidWebhookSignature,
            WebhookError::ParseError(msg) => BillingError::ValidationFailed {
                field: "payload".to_string(),
                message: msg,
            },
        }
    }
}

impl From<DomainError> for BillingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::CustomerNotFound => match err
                .details
                .get("customer_id")
                .and_then(|id| id.parse().ok())
            {
                Some(id) => BillingError::CustomerNotFound(id),
                None => BillingError::Persistence(err.to_string()),
            },
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::NotPositive => {
                BillingError::ValidationFailed {
                    field: err
                        .details
                        .get("field")
                        .cloned()
                        .unwrap_or_else(|| "unknown".to_string()),
                    message: err.message,
                }
            }
            _ => BillingError::Persistence(err.to_string()),
        }
    }
}
