//! Kill-switch store port.

use async_trait::async_trait;

use crate::domain::billing::KillSwitch;
use crate::domain::foundation::DomainError;

/// Store for the versioned global kill-switch record.
///
/// Writes append a new record; reads return the most recently created one,
/// which is the only authoritative state.
#[async_trait]
pub trait KillSwitchStore: Send + Sync {
    /// The latest kill-switch record, if any was ever written.
    async fn current(&self) -> Result<Option<KillSwitch>, DomainError>;

    /// Append a new kill-switch record, making it the current state.
    async fn append(&self, record: &KillSwitch) -> Result<(), DomainError>;
}
