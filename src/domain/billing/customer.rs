//! Customer aggregate entity.
//!
//! A Customer is a billable client owning zero or more websites. Billing
//! state (`is_active`, subscription dates) and access-control state
//! (`is_blocked` plus reason/timestamps) are independent: a customer can be
//! active yet blocked by the global kill switch, or inactive and blocked for
//! an overdue subscription.
//!
//! # Design Decisions
//!
//! - **Money in cents**: All monetary values are i64 cents, never floats
//! - **Day-granularity billing dates**: `NaiveDate`, compared as days
//! - **No hard delete**: customers are deactivated, never removed

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CustomerId, Timestamp, ValidationError};

use super::clock::{self, ExpiryStatus};

/// Customer aggregate - a billable client of the hosting provider.
///
/// # Invariants
///
/// - `price > 0` at creation
/// - Effective price is `custom_price` only when `use_custom_price` is set
///   and the custom price is positive
/// - `blocked_reason`/`blocked_at` are set exactly when `is_blocked` is true
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier for this customer.
    pub id: CustomerId,

    /// Business name used in invoices and notifications.
    pub business_name: String,

    /// Contact email.
    pub email: String,

    /// Contact phone number.
    pub phone: String,

    /// Optional WhatsApp number for reminder messages.
    pub whatsapp: Option<String>,

    /// Primary website URL shown on the dashboard.
    pub website_url: Option<String>,

    /// Date the current billing period began.
    pub subscription_start: NaiveDate,

    /// Explicit end of the paid period; when absent the period runs
    /// thirty days from `subscription_start`.
    pub subscription_end_date: Option<NaiveDate>,

    /// Standard monthly price in cents.
    pub price: i64,

    /// Negotiated monthly price in cents, if any.
    pub custom_price: Option<i64>,

    /// Whether the negotiated price overrides the standard one.
    pub use_custom_price: bool,

    /// Whether the subscription is currently considered paid/current.
    pub is_active: bool,

    /// Marks long-standing clients for reporting.
    pub is_regular_client: bool,

    /// Whether website access is currently blocked.
    pub is_blocked: bool,

    /// Why access is blocked, when it is.
    pub blocked_reason: Option<String>,

    /// When access was blocked.
    pub blocked_at: Option<Timestamp>,

    /// When access was last restored.
    pub unblocked_at: Option<Timestamp>,

    /// When the customer record was created.
    pub created_at: Timestamp,

    /// When the customer record was last updated.
    pub updated_at: Timestamp,
}

impl Customer {
    /// Creates a new active, unblocked customer.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `business_name` is empty or `price`
    /// is not positive.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        id: CustomerId,
        business_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        subscription_start: NaiveDate,
        price: i64,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let business_name = business_name.into();
        if business_name.trim().is_empty() {
            return Err(ValidationError::empty_field("business_name"));
        }
        if price <= 0 {
            return Err(ValidationError::not_positive("price", price));
        }

        Ok(Self {
            id,
            business_name,
            email: email.into(),
            phone: phone.into(),
            whatsapp: None,
            website_url: None,
            subscription_start,
            subscription_end_date: None,
            price,
            custom_price: None,
            use_custom_price: false,
            is_active: true,
            is_regular_client: false,
            is_blocked: false,
            blocked_reason: None,
            blocked_at: None,
            unblocked_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Monthly amount owed in cents.
    ///
    /// The negotiated price applies only when the override flag is set and
    /// the negotiated amount is positive; otherwise the standard price.
    pub fn effective_price(&self) -> i64 {
        match self.custom_price {
            Some(custom) if self.use_custom_price && custom > 0 => custom,
            _ => self.price,
        }
    }

    /// Effective end of the current billing period.
    pub fn period_end(&self) -> NaiveDate {
        clock::period_end(self.subscription_start, self.subscription_end_date)
    }

    /// Whole days until the billing period ends, negative when overdue.
    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        clock::days_remaining(self.subscription_start, self.subscription_end_date, today)
    }

    /// Expiry classification relative to `today`.
    pub fn expiry_status(&self, today: NaiveDate) -> ExpiryStatus {
        clock::classify(self.days_remaining(today))
    }

    /// End date after crediting `months_paid` calendar months.
    ///
    /// Extension stacks on whichever is later: today or the existing end
    /// date. A renewal can therefore never shorten remaining access.
    pub fn extended_end_date(&self, months_paid: u32, today: NaiveDate) -> NaiveDate {
        let base = match self.subscription_end_date {
            Some(end) if end > today => end,
            _ => today,
        };
        base + Months::new(months_paid)
    }

    /// Blocks website access for this customer.
    ///
    /// Re-blocking an already-blocked customer refreshes the reason and
    /// timestamp; it is otherwise a no-op.
    pub fn block(&mut self, reason: impl Into<String>, now: Timestamp) {
        self.is_blocked = true;
        self.blocked_reason = Some(reason.into());
        self.blocked_at = Some(now);
        self.unblocked_at = None;
        self.updated_at = now;
    }

    /// Restores website access for this customer.
    pub fn unblock(&mut self, now: Timestamp) {
        self.is_blocked = false;
        self.blocked_reason = None;
        self.blocked_at = None;
        self.unblocked_at = Some(now);
        self.updated_at = now;
    }

    /// Marks the subscription lapsed (expiry sweep).
    pub fn deactivate(&mut self, now: Timestamp) {
        self.is_active = false;
        self.updated_at = now;
    }

    /// Applies a settled payment: reactivates, clears block state, and
    /// moves the period end to `new_end`.
    pub fn settle(&mut self, new_end: NaiveDate, now: Timestamp) {
        self.is_active = true;
        self.subscription_end_date = Some(new_end);
        self.unblock(now);
    }
}
