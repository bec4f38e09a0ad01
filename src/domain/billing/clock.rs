//! Subscription clock - pure date arithmetic for billing periods.
//!
//! All arithmetic is at day granularity: dates are compared as calendar
//! days, never as instants, so a sweep running just before midnight and a
//! webhook landing just after produce the same classification.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Length of the default billing period when no explicit end date is set.
pub const DEFAULT_PERIOD_DAYS: i64 = 30;

/// Customers within this many days of expiry are surfaced for reminders.
pub const EXPIRY_WARNING_DAYS: i64 = 7;

/// Expiry classification of a subscription relative to a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    /// Period has ended; the customer owes payment.
    Expired,
    /// Period ends within the warning window (1-7 days).
    ExpiringSoon,
    /// Period end is more than the warning window away.
    Current,
}

/// Resolves the effective end of a billing period.
///
/// An explicit end date wins; otherwise the period runs
/// [`DEFAULT_PERIOD_DAYS`] from its start.
pub fn period_end(start: NaiveDate, end: Option<NaiveDate>) -> NaiveDate {
    end.unwrap_or(start + Duration::days(DEFAULT_PERIOD_DAYS))
}

/// Whole days from `today` until the period ends.
///
/// Zero or negative means the period has ended; `-days_remaining` is the
/// number of days overdue.
pub fn days_remaining(start: NaiveDate, end: Option<NaiveDate>, today: NaiveDate) -> i64 {
    (period_end(start, end) - today).num_days()
}

/// Classifies a subscription by its remaining days.
pub fn classify(days_remaining: i64) -> ExpiryStatus {
    if days_remaining <= 0 {
        ExpiryStatus::Expired
    } else if days_remaining <= EXPIRY_WARNING_DAYS {
        ExpiryStatus::ExpiringSoon
    } else {
        ExpiryStatus::Current
    }
}
