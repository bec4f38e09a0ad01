//! CheckDomainAccessHandler - the kill-switch query served to client sites.
//!
//! Combines the latest global kill-switch record with the per-website row.
//! The global reason wins ties; a block with no recorded reason falls back
//! to a generic message so internal detail never reaches the blocked site.

use std::sync::Arc;

use crate::domain::billing::{BillingError, WebsiteStatus, RESTRICTED_FALLBACK_REASON};
use crate::ports::{KillSwitchStore, WebsiteRepository};

/// Query from a client website asking whether it should be blocked.
#[derive(Debug, Clone)]
pub struct CheckDomainAccessQuery {
    pub domain: String,
}

/// Access verdict for a domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainAccess {
    pub domain: String,
    pub blocked: bool,
    /// Reason to show the end user when blocked.
    pub reason: String,
    pub global_kill_switch: bool,
    pub website_blocked: bool,
}

pub struct CheckDomainAccessHandler {
    websites: Arc<dyn WebsiteRepository>,
    kill_switch: Arc<dyn KillSwitchStore>,
}

impl CheckDomainAccessHandler {
    pub fn new(
        websites: Arc<dyn WebsiteRepository>,
        kill_switch: Arc<dyn KillSwitchStore>,
    ) -> Self {
        Self {
            websites,
            kill_switch,
        }
    }

    pub async fn handle(&self, query: CheckDomainAccessQuery) -> Result<DomainAccess, BillingError> {
        if query.domain.trim().is_empty() {
            return Err(BillingError::validation("domain", "domain is required"));
        }

        let kill_switch = self.kill_switch.current().await?;
        let global_active = kill_switch.as_ref().map(|ks| ks.is_active).unwrap_or(false);

        // An unknown domain is not an error: the site still honors the
        // global switch.
        let website = self.websites.find_by_domain(&query.domain).await?;
        let website_blocked = website
            .as_ref()
            .map(|w| w.status == WebsiteStatus::Blocked)
            .unwrap_or(false);

        let blocked = global_active || website_blocked;

        let reason = if global_active {
            kill_switch.map(|ks| ks.reason).filter(|r| !r.is_empty())
        } else {
            website.and_then(|w| w.blocked_reason)
        }
        .unwrap_or_else(|| RESTRICTED_FALLBACK_REASON.to_string());

        Ok(DomainAccess {
            domain: query.domain,
            blocked,
            reason,
            global_kill_switch: global_active,
            website_blocked,
        })
    }
}
