//! Paystack webhook signature verification.
//!
//! Paystack signs the raw request body with HMAC-SHA512 and sends the hex
//! digest in the `x-paystack-signature` header. Verification must run over
//! the bytes exactly as received: re-serializing a parsed object before
//! hashing risks a mismatch from formatting differences alone.

use hmac::{Hmac, Mac};
use sha2::Sha512;
use subtle::ConstantTimeEq;
use thiserror::Error;

use super::paystack_event::PaystackEvent;

/// Errors from webhook verification and payload parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WebhookError {
    /// Signature did not match the payload.
    #[error("webhook signature verification failed")]
    InvalidSignature,

    /// Header or JSON payload could not be parsed.
    #[error("webhook parse error: {0}")]
    ParseError(String),
}

/// Verifier for Paystack webhook signatures.
pub struct PaystackWebhookVerifier {
    /// Shared secret from the Paystack dashboard.
    secret: String,
}

impl PaystackWebhookVerifier {
    /// Creates a new verifier with the given webhook secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Verifies the signature header against the raw payload bytes.
    ///
    /// # Errors
    ///
    /// - `ParseError` - header is not valid hex
    /// - `InvalidSignature` - digest mismatch
    pub fn verify(&self, payload: &[u8], signature_header: &str) -> Result<(), WebhookError> {
        let provided = hex::decode(signature_header.trim())
            .map_err(|_| WebhookError::ParseError("signature header is not hex".to_string()))?;

        let expected = self.compute_signature(payload);

        if !constant_time_compare(&expected, &provided) {
            return Err(WebhookError::InvalidSignature);
        }

        Ok(())
    }

    /// Verifies the signature and parses the payload into a typed event.
    pub fn verify_and_parse(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<PaystackEvent, WebhookError> {
        self.verify(payload, signature_header)?;

        serde_json::from_slice(payload).map_err(|e| WebhookError::ParseError(e.to_string()))
    }

    /// Computes the HMAC-SHA512 digest of the payload.
    fn compute_signature(&self, payload: &[u8]) -> Vec<u8> {
        let mut mac = Hmac::<Sha512>::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }
}

/// Constant-time comparison of two byte slices.
///
/// Prevents timing attacks that could leak the expected signature.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Computes the hex signature for a payload, for test fixtures.
#[cfg(test)]
pub fn compute_test_signature(secret: &str, payload: &[u8]) -> String {
    let mut mac =
        Hmac::<Sha512>::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}
