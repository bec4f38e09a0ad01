//! Billing domain module.
//!
//! Covers the subscription lifecycle and access-control state machine:
//! the subscription clock, the customer and website aggregates, the global
//! kill switch, the revenue ledger, and Paystack webhook verification.
//!
//! # Module Structure
//!
//! - `clock` - Pure subscription date arithmetic and expiry classification
//! - `customer` - Customer aggregate (billing + block state)
//! - `website` - Website entity and access-status state machine
//! - `access` - Access Gate decision combining customer and kill-switch state
//! - `kill_switch` - Global override record and deactivation policy
//! - `revenue` - Append-only revenue ledger entries
//! - `support` - Inbound support messages from blocked sites
//! - `paystack_event` - Typed Paystack webhook payloads
//! - `webhook_verifier` - HMAC-SHA512 signature verification
//! - `errors` - Billing error type with HTTP status mapping

mod access;
mod clock;
mod customer;
mod errors;
mod kill_switch;
mod paystack_event;
mod revenue;
mod support;
mod website;
mod webhook_verifier;

pub use access::{AccessDecision, compute_blocked, RESTRICTED_FALLBACK_REASON};
pub use clock::{classify, days_remaining, period_end, ExpiryStatus, DEFAULT_PERIOD_DAYS, EXPIRY_WARNING_DAYS};
pub use customer::Customer;
pub use errors::{BillingError, SettlementStage};
pub use kill_switch::{DeactivationPolicy, KillSwitch, KILL_SWITCH_REASON};
pub use paystack_event::{ChargeData, ChargeMetadata, PaystackEvent, CHARGE_SUCCESS};
pub use revenue::{RevenueEntry, RevenueKind};
pub use support::{SupportMessage, SupportMessageStatus};
pub use website::{Website, WebsiteStatus};
pub use webhook_verifier::{PaystackWebhookVerifier, WebhookError};

#[cfg(test)]
pub use webhook_verifier::compute_test_signature;
