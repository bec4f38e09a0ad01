//! Access Gate decision logic.
//!
//! Decides, for a `(customer, kill switch)` pair, whether website access
//! should be blocked and with which reason. The global kill switch takes
//! precedence over customer-specific state when both are set.

use super::customer::Customer;
use super::kill_switch::KillSwitch;

/// Reason shown to end users when a block carries no specific reason.
/// Internal error detail is never exposed on the blocked-site surface.
pub const RESTRICTED_FALLBACK_REASON: &str = "Website access restricted";

/// Outcome of an access decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessDecision {
    pub blocked: bool,
    pub reason: Option<String>,
}

impl AccessDecision {
    /// Allowed access.
    pub fn allowed() -> Self {
        Self {
            blocked: false,
            reason: None,
        }
    }

    /// Blocked access with an optional specific reason.
    pub fn blocked(reason: Option<String>) -> Self {
        Self {
            blocked: true,
            reason,
        }
    }

    /// The reason to present to the blocked end user.
    pub fn reason_or_default(&self) -> &str {
        self.reason
            .as_deref()
            .filter(|r| !r.is_empty())
            .unwrap_or(RESTRICTED_FALLBACK_REASON)
    }
}

/// Computes whether access for a customer is blocked.
///
/// Precedence: an active global kill switch blocks with its own reason,
/// even when the customer is individually blocked for something else;
/// otherwise the customer's own block state applies.
pub fn compute_blocked(customer: &Customer, kill_switch: Option<&KillSwitch>) -> AccessDecision {
    if let Some(ks) = kill_switch {
        if ks.is_active {
            return AccessDecision::blocked(Some(ks.reason.clone()));
        }
    }

    if customer.is_blocked {
        return AccessDecision::blocked(customer.blocked_reason.clone());
    }

    AccessDecision::allowed()
}
