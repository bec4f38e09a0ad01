//! Access-control cascade port.
//!
//! A block or unblock spans two tables (customer + websites) and must be
//! all-or-nothing per customer: scattering the writes across call sites is
//! exactly the partial-cascade bug this port exists to prevent.
//! Implementations execute each cascade inside a single transaction.

use async_trait::async_trait;

use crate::domain::billing::DeactivationPolicy;
use crate::domain::foundation::{CustomerId, DomainError, Timestamp};

/// Counts of rows affected by a cascade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeReport {
    pub customers_affected: u64,
    pub websites_affected: u64,
}

/// Transactional write side of the Access Gate.
#[async_trait]
pub trait AccessControlStore: Send + Sync {
    /// Block a customer and every website they own, atomically.
    ///
    /// Re-blocking an already-blocked customer refreshes the reason and
    /// timestamp without duplicate side effects.
    ///
    /// # Errors
    ///
    /// - `CustomerNotFound` when the customer does not exist
    async fn block_customer_cascade(
        &self,
        customer_id: &CustomerId,
        reason: &str,
        now: Timestamp,
    ) -> Result<CascadeReport, DomainError>;

    /// Unblock a customer and their currently-blocked websites,
    /// atomically. Websites in maintenance are left untouched.
    ///
    /// # Errors
    ///
    /// - `CustomerNotFound` when the customer does not exist
    async fn unblock_customer_cascade(
        &self,
        customer_id: &CustomerId,
        now: Timestamp,
    ) -> Result<CascadeReport, DomainError>;

    /// Kill-switch activation: block every currently-active,
    /// currently-unblocked customer and every currently-active website in
    /// one batch transaction.
    async fn block_all_active(
        &self,
        reason: &str,
        now: Timestamp,
    ) -> Result<CascadeReport, DomainError>;

    /// Kill-switch deactivation: unblock blocked customers and websites in
    /// one batch transaction, scoped by `policy`.
    async fn unblock_all_blocked(
        &self,
        policy: DeactivationPolicy,
        now: Timestamp,
    ) -> Result<CascadeReport, DomainError>;
}
