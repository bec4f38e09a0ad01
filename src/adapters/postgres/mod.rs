//! PostgreSQL adapter - sqlx implementations of the persistence ports.
//!
//! Raw rows are mapped into domain entities through typed row structs and
//! `TryFrom`; the core never sees loosely-shaped records.

mod access_control;
mod customer_repository;
mod kill_switch_store;
mod revenue_ledger;
mod support_message_store;
mod website_repository;

pub use access_control::PostgresAccessControlStore;
pub use customer_repository::PostgresCustomerRepository;
pub use kill_switch_store::PostgresKillSwitchStore;
pub use revenue_ledger::PostgresRevenueLedger;
pub use support_message_store::PostgresSupportMessageStore;
pub use website_repository::PostgresWebsiteRepository;
