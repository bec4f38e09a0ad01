//! Security configuration - shared secrets for the public endpoints.

use serde::Deserialize;

use super::error::ValidationError;

/// Shared-secret configuration.
///
/// Each public surface has its own secret: the cron trigger uses a bearer
/// token, the kill-switch query an API key, the admin endpoints a bearer
/// token, and the payment webhook an HMAC signing secret.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecurityConfig {
    /// Bearer token required by the cron deactivation endpoint
    pub cron_secret: String,

    /// API key required by the kill-switch query endpoint
    pub killswitch_api_key: String,

    /// Bearer token required by the admin endpoints
    pub admin_token: String,

    /// Paystack webhook signing secret
    pub paystack_webhook_secret: String,
}

impl SecurityConfig {
    /// Validate security configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.cron_secret.is_empty() {
            return Err(ValidationError::MissingRequired("CRON_SECRET"));
        }
        if self.killswitch_api_key.is_empty() {
            return Err(ValidationError::MissingRequired("KILLSWITCH_API_KEY"));
        }
        if self.admin_token.is_empty() {
            return Err(ValidationError::MissingRequired("ADMIN_TOKEN"));
        }
        if self.paystack_webhook_secret.is_empty() {
            return Err(ValidationError::MissingRequired("PAYSTACK_WEBHOOK_SECRET"));
        }
        for (name, value) in [
            ("CRON_SECRET", &self.cron_secret),
            ("KILLSWITCH_API_KEY", &self.killswitch_api_key),
            ("ADMIN_TOKEN", &self.admin_token),
        ] {
            if value.len() < 16 {
                return Err(ValidationError::SecretTooShort(name));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_config() -> SecurityConfig {
        SecurityConfig {
            cron_secret: "cron-secret-0123456789ab".to_string(),
            killswitch_api_key: "ks-api-key-0123456789ab".to_string(),
            admin_token: "admin-token-0123456789ab".to_string(),
            paystack_webhook_secret: "sk_test_webhook".to_string(),
        }
    }

    #[test]
    fn test_full_config_validates() {
        assert!(full_config().validate().is_ok());
    }

    #[test]
    fn test_missing_secret_fails() {
        let mut config = full_config();
        config.cron_secret = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_short_secret_fails() {
        let mut config = full_config();
        config.admin_token = "short".to_string();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::SecretTooShort("ADMIN_TOKEN"))
        ));
    }
}
