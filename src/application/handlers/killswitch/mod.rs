//! Global kill-switch handlers.

mod activate_kill_switch;
mod deactivate_kill_switch;

pub use activate_kill_switch::{ActivateKillSwitchCommand, ActivateKillSwitchHandler};
pub use deactivate_kill_switch::{DeactivateKillSwitchCommand, DeactivateKillSwitchHandler};
