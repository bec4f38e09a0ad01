//! DeactivateKillSwitchHandler - lifts the global emergency block.
//!
//! Which customers get restored depends on the configured policy:
//! `RestoreAll` reproduces the original broad-brush behavior (every blocked
//! customer comes back, including those blocked for non-payment), while
//! `PreserveOverdue` restores only entities blocked by the kill switch
//! itself.

use std::sync::Arc;

use crate::domain::billing::{BillingError, DeactivationPolicy, KillSwitch};
use crate::domain::foundation::Timestamp;
use crate::ports::{AccessControlStore, CascadeReport, KillSwitchStore};

/// Command to deactivate the global kill switch.
#[derive(Debug, Clone)]
pub struct DeactivateKillSwitchCommand {
    pub policy: DeactivationPolicy,
    pub now: Timestamp,
}

pub struct DeactivateKillSwitchHandler {
    kill_switch: Arc<dyn KillSwitchStore>,
    access_control: Arc<dyn AccessControlStore>,
}

impl DeactivateKillSwitchHandler {
    pub fn new(
        kill_switch: Arc<dyn KillSwitchStore>,
        access_control: Arc<dyn AccessControlStore>,
    ) -> Self {
        Self {
            kill_switch,
            access_control,
        }
    }

    pub async fn handle(
        &self,
        cmd: DeactivateKillSwitchCommand,
    ) -> Result<CascadeReport, BillingError> {
        self.kill_switch
            .append(&KillSwitch::deactivated(cmd.now))
            .await?;

        let report = self
            .access_control
            .unblock_all_blocked(cmd.policy, cmd.now)
            .await?;

        tracing::warn!(
            policy = ?cmd.policy,
            customers = report.customers_affected,
            websites = report.websites_affected,
            "kill switch deactivated"
        );

        Ok(report)
    }
}
