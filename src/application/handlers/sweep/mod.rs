//! Expiry sweep handlers.

mod check_subscription_status;
mod run_expiry_sweep;

pub use check_subscription_status::{
    CheckSubscriptionStatusHandler, CheckSubscriptionStatusQuery, SubscriptionStatusReport,
};
pub use run_expiry_sweep::{
    ExpiredCustomer, ExpiringCustomer, RunExpirySweepCommand, RunExpirySweepHandler,
    SweepRecordError, SweepReport,
};
