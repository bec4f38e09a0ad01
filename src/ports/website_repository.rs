//! Website repository port.

use async_trait::async_trait;

use crate::domain::billing::Website;
use crate::domain::foundation::{CustomerId, DomainError};

/// Repository port for Website entities.
///
/// Status changes that must stay consistent with the owning customer go
/// through [`crate::ports::AccessControlStore`] cascades instead of
/// per-row writes here.
#[async_trait]
pub trait WebsiteRepository: Send + Sync {
    /// Persist a new website.
    async fn save(&self, website: &Website) -> Result<(), DomainError>;

    /// Find a website by its domain. Returns `None` if not found.
    async fn find_by_domain(&self, domain: &str) -> Result<Option<Website>, DomainError>;

    /// All websites owned by a customer.
    async fn list_by_customer(&self, customer_id: &CustomerId)
        -> Result<Vec<Website>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn website_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn WebsiteRepository) {}
    }
}
