//! Typed Paystack webhook event payloads.
//!
//! Only the fields the settlement flow consumes are modeled; everything
//! else in the provider payload is ignored during deserialization.

use serde::{Deserialize, Deserializer, Serialize};

/// Event type for a successful charge.
pub const CHARGE_SUCCESS: &str = "charge.success";

/// Envelope of a Paystack webhook event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaystackEvent {
    /// Event type, e.g. `charge.success`.
    pub event: String,
    pub data: ChargeData,
}

impl PaystackEvent {
    /// Whether this event reports a settled charge.
    pub fn is_charge_success(&self) -> bool {
        self.event == CHARGE_SUCCESS
    }
}

/// Charge payload carried by payment events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargeData {
    /// Amount paid in subunits (kobo/cents).
    pub amount: i64,
    /// Provider payment reference.
    pub reference: String,
    #[serde(default)]
    pub metadata: Option<ChargeMetadata>,
}

/// Merchant-supplied metadata attached at checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargeMetadata {
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub business_name: Option<String>,
    /// Months covered by this payment. Paystack metadata frequently
    /// arrives stringly-typed, so both `3` and `"3"` are accepted.
    #[serde(default, deserialize_with = "months_paid_from_any")]
    pub months_paid: Option<u32>,
}

impl ChargeMetadata {
    /// Months covered, defaulting to a single month.
    pub fn months_paid_or_default(&self) -> u32 {
        self.months_paid.unwrap_or(1).max(1)
    }
}

fn months_paid_from_any<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(i64),
        String(String),
    }

    let value = Option::<NumberOrString>::deserialize(deserializer)?;
    Ok(match value {
        Some(NumberOrString::Number(n)) if n > 0 => Some(n as u32),
        Some(NumberOrString::String(s)) => s.trim().parse::<u32>().ok().filter(|n| *n > 0),
        _ => None,
    })
}
