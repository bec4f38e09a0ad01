//! Ports - contracts between the application core and infrastructure.
//!
//! Each port is an async trait implemented by an adapter (PostgreSQL in
//! production, in-memory mocks in tests).

mod access_control;
mod customer_repository;
mod kill_switch_store;
mod revenue_ledger;
mod support_message_store;
mod website_repository;

pub use access_control::{AccessControlStore, CascadeReport};
pub use customer_repository::CustomerRepository;
pub use kill_switch_store::KillSwitchStore;
pub use revenue_ledger::RevenueLedger;
pub use support_message_store::SupportMessageStore;
pub use website_repository::WebsiteRepository;
