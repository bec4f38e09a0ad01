//! Kill-switch deactivation behavior configuration.

use serde::Deserialize;

use crate::domain::billing::DeactivationPolicy;

/// Sweep and kill-switch behavior configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SweepConfig {
    /// How a kill-switch deactivation treats customers blocked for other
    /// reasons. `restore_all` matches the historical behavior;
    /// `preserve_overdue` keeps payment-blocked customers blocked.
    #[serde(default)]
    pub deactivation_policy: DeactivationPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_defaults_to_restore_all() {
        let config = SweepConfig::default();
        assert_eq!(config.deactivation_policy, DeactivationPolicy::RestoreAll);
    }

    #[test]
    fn test_policy_deserializes() {
        let config: SweepConfig =
            serde_json::from_str(r#"{"deactivation_policy":"preserve_overdue"}"#).unwrap();
        assert_eq!(
            config.deactivation_policy,
            DeactivationPolicy::PreserveOverdue
        );
    }
}
