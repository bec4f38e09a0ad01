//! Website entity and access-status state machine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CustomerId, StateMachine, Timestamp, WebsiteId};

/// Access status of a hosted website.
///
/// `Maintenance` is an operator-controlled state orthogonal to billing:
/// billing cascades never lift it back to `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebsiteStatus {
    /// Serving normally.
    Active,
    /// Blocked by billing state or the global kill switch.
    Blocked,
    /// Taken down by an operator for maintenance.
    Maintenance,
}

impl StateMachine for WebsiteStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use WebsiteStatus::*;
        matches!(
            (self, target),
            (Active, Blocked)
                | (Active, Maintenance)
                | (Blocked, Active)
                | (Blocked, Blocked) // reason refresh
                | (Maintenance, Active)
                | (Maintenance, Blocked)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use WebsiteStatus::*;
        match self {
            Active => vec![Blocked, Maintenance],
            Blocked => vec![Active, Blocked],
            Maintenance => vec![Active, Blocked],
        }
    }
}

/// A hosted website whose access is gated by its owner's billing state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Website {
    pub id: WebsiteId,

    /// Owning customer; a customer may have multiple websites.
    pub customer_id: CustomerId,

    /// Fully-qualified domain, unique per website.
    pub domain: String,

    pub status: WebsiteStatus,

    /// Why access is blocked, when it is.
    pub blocked_reason: Option<String>,

    pub blocked_at: Option<Timestamp>,

    pub unblocked_at: Option<Timestamp>,

    pub created_at: Timestamp,

    pub updated_at: Timestamp,
}

impl Website {
    /// Creates a new active website for a customer.
    pub fn new(
        id: WebsiteId,
        customer_id: CustomerId,
        domain: impl Into<String>,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            customer_id,
            domain: domain.into(),
            status: WebsiteStatus::Active,
            blocked_reason: None,
            blocked_at: None,
            unblocked_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Blocks the website with the given reason.
    ///
    /// Applies from any state (a customer-level block covers every owned
    /// website); re-blocking refreshes the reason and timestamp.
    pub fn block(&mut self, reason: impl Into<String>, now: Timestamp) {
        self.status = WebsiteStatus::Blocked;
        self.blocked_reason = Some(reason.into());
        self.blocked_at = Some(now);
        self.unblocked_at = None;
        self.updated_at = now;
    }

    /// Restores a blocked website to active.
    ///
    /// Returns whether the transition applied: websites in `Maintenance`
    /// are left untouched, and an already-active site is a no-op.
    pub fn unblock(&mut self, now: Timestamp) -> bool {
        if self.status != WebsiteStatus::Blocked {
            return false;
        }
        self.status = WebsiteStatus::Active;
        self.blocked_reason = None;
        self.blocked_at = None;
        self.unblocked_at = Some(now);
        self.updated_at = now;
        true
    }

    /// Moves the website into operator-controlled maintenance.
    pub fn set_maintenance(&mut self, now: Timestamp) {
        self.status = WebsiteStatus::Maintenance;
        self.updated_at = now;
    }
}
