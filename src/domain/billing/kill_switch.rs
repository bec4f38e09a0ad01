//! Global kill-switch record.
//!
//! Modeled as a versioned, latest-wins record rather than a process-global
//! flag, so multiple service instances read a consistent state through the
//! same persistence boundary as customer records.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{KillSwitchId, Timestamp};

/// Reason stamped onto every customer and website blocked by a global
/// kill-switch activation. Per-entity state stays self-describing even
/// without consulting the global record.
pub const KILL_SWITCH_REASON: &str = "Manual kill switch activation";

/// Snapshot of the global override. Only the most recently created record
/// is authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillSwitch {
    pub id: KillSwitchId,
    pub is_active: bool,
    pub reason: String,
    pub created_at: Timestamp,
}

impl KillSwitch {
    /// A record activating the global override.
    pub fn activated(reason: impl Into<String>, now: Timestamp) -> Self {
        Self {
            id: KillSwitchId::new(),
            is_active: true,
            reason: reason.into(),
            created_at: now,
        }
    }

    /// A record deactivating the global override.
    pub fn deactivated(now: Timestamp) -> Self {
        Self {
            id: KillSwitchId::new(),
            is_active: false,
            reason: String::new(),
            created_at: now,
        }
    }
}

/// How a kill-switch deactivation treats customers blocked for other
/// reasons.
///
/// The original system restored every blocked customer, including those
/// blocked for non-payment; that behavior is kept as the default but is
/// configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeactivationPolicy {
    /// Unblock every blocked customer and website regardless of why they
    /// were blocked.
    #[default]
    RestoreAll,
    /// Unblock only entities whose block reason is the kill-switch reason,
    /// leaving overdue customers blocked.
    PreserveOverdue,
}
