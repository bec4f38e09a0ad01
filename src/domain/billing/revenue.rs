//! Revenue ledger entries.
//!
//! The ledger is append-only: entries are created by payment settlement
//! (subscription) or manual operator entry (one-time) and never mutated.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CustomerId, RevenueEntryId};

/// Category of a revenue entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevenueKind {
    #[serde(rename = "subscription")]
    Subscription,
    #[serde(rename = "one-time")]
    OneTime,
}

/// A single, immutable ledger entry. Amounts are in cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueEntry {
    pub id: RevenueEntryId,
    pub client_id: CustomerId,
    pub amount: i64,
    pub kind: RevenueKind,
    pub date: NaiveDate,
    pub description: String,
    /// Number of months covered, for subscription payments.
    pub months_paid: Option<u32>,
    /// Payment-provider reference, for subscription payments.
    pub payment_reference: Option<String>,
}

impl RevenueEntry {
    /// Entry for a settled subscription payment.
    pub fn subscription(
        client_id: CustomerId,
        amount: i64,
        months_paid: u32,
        reference: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: RevenueEntryId::new(),
            client_id,
            amount,
            kind: RevenueKind::Subscription,
            date,
            description: description.into(),
            months_paid: Some(months_paid),
            payment_reference: Some(reference.into()),
        }
    }

    /// Entry for a manually recorded one-time payment.
    pub fn one_time(
        client_id: CustomerId,
        amount: i64,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: RevenueEntryId::new(),
            client_id,
            amount,
            kind: RevenueKind::OneTime,
            date,
            description: description.into(),
            months_paid: None,
            payment_reference: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn subscription_entry_carries_months_and_reference() {
        let entry = RevenueEntry::subscription(
            CustomerId::new(),
            15_000,
            3,
            "PSK_ref_123",
            "Paystack payment for Acme Bakery - 3 month(s) (Ref: PSK_ref_123)",
            date(2024, 3, 1),
        );

        assert_eq!(entry.kind, RevenueKind::Subscription);
        assert_eq!(entry.months_paid, Some(3));
        assert_eq!(entry.payment_reference.as_deref(), Some("PSK_ref_123"));
    }

    #[test]
    fn one_time_entry_has_no_subscription_fields() {
        let entry = RevenueEntry::one_time(
            CustomerId::new(),
            2_500,
            "Logo redesign",
            date(2024, 3, 1),
        );

        assert_eq!(entry.kind, RevenueKind::OneTime);
        assert!(entry.months_paid.is_none());
        assert!(entry.payment_reference.is_none());
    }

    #[test]
    fn kind_serializes_with_hyphenated_one_time() {
        assert_eq!(
            serde_json::to_string(&RevenueKind::OneTime).unwrap(),
            "\"one-time\""
        );
        assert_eq!(
            serde_json::to_string(&RevenueKind::Subscription).unwrap(),
            "\"subscription\""
        );
    }
}
