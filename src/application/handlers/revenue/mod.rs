//! Revenue ledger handlers.

mod record_manual_revenue;

pub use record_manual_revenue::{RecordManualRevenueCommand, RecordManualRevenueHandler};
