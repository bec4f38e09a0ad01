//! Customer repository port.
//!
//! Persistence contract for Customer aggregates. The state-changing
//! methods used by the expiry sweep and payment settlement are conditional
//! updates, not blind overwrites, so a sweep and a settlement racing on
//! the same customer resolve safely (see `deactivate_if_expired`).

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::billing::Customer;
use crate::domain::foundation::{CustomerId, DomainError, Timestamp};

/// Repository port for Customer aggregate persistence.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Persist a new customer.
    async fn save(&self, customer: &Customer) -> Result<(), DomainError>;

    /// Find a customer by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, DomainError>;

    /// All customers, active or not. Customers are never hard-deleted, so
    /// this is the full book of business.
    async fn list_all(&self) -> Result<Vec<Customer>, DomainError>;

    /// Conditionally deactivate a customer whose billing period has ended.
    ///
    /// The guard (`is_active` AND effective period end on or before
    /// `today`) is re-evaluated atomically by the store. Returns whether
    /// the guard matched and the row changed: a concurrent settlement that
    /// already extended the end date makes this return `false`, and the
    /// caller must skip the block cascade.
    async fn deactivate_if_expired(
        &self,
        id: &CustomerId,
        today: NaiveDate,
        now: Timestamp,
    ) -> Result<bool, DomainError>;

    /// Apply a settled payment in one atomic write: reactivate the
    /// customer, clear block state, stamp `unblocked_at`, and move the
    /// period end to `new_end`.
    ///
    /// # Errors
    ///
    /// - `CustomerNotFound` when the customer does not exist
    async fn apply_settlement(
        &self,
        id: &CustomerId,
        new_end: NaiveDate,
        now: Timestamp,
    ) -> Result<(), DomainError>;
}
