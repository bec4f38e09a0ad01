//! ActivateKillSwitchHandler - global emergency block.
//!
//! Writes the global flag and then individually blocks every active,
//! unblocked customer and every active website. The double bookkeeping is
//! deliberate: per-entity state stays self-describing even for readers
//! that never consult the global record.

use std::sync::Arc;

use crate::domain::billing::{BillingError, KillSwitch, KILL_SWITCH_REASON};
use crate::domain::foundation::Timestamp;
use crate::ports::{AccessControlStore, CascadeReport, KillSwitchStore};

/// Command to activate the global kill switch.
#[derive(Debug, Clone)]
pub struct ActivateKillSwitchCommand {
    /// Reason recorded on the global flag. Per-entity blocks always carry
    /// the standard kill-switch reason.
    pub reason: Option<String>,
    pub now: Timestamp,
}

pub struct ActivateKillSwitchHandler {
    kill_switch: Arc<dyn KillSwitchStore>,
    access_control: Arc<dyn AccessControlStore>,
}

impl ActivateKillSwitchHandler {
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
        cmd: ActivateKillSwitchCommand,
    ) -> Result<CascadeReport, BillingError> {
        let reason = cmd
            .reason
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| KILL_SWITCH_REASON.to_string());

        // The global flag goes first: once written, every status query
        // blocks, even if the per-entity batch below fails.
        self.kill_switch
            .append(&KillSwitch::activated(reason, cmd.now))
            .await?;

        let report = self
            .access_control
            .block_all_active(KILL_SWITCH_REASON, cmd.now)
            .await?;

        tracing::warn!(
            customers = report.customers_affected,
            websites = report.websites_affected,
            "kill switch activated"
        );

        Ok(report)
    }
}
