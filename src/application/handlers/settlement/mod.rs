//! Payment settlement handlers.

mod handle_paystack_webhook;
mod settle_payment;

pub use handle_paystack_webhook::{
    HandlePaystackWebhookCommand, HandlePaystackWebhookHandler, PaystackWebhookOutcome,
};
pub use settle_payment::{SettlePaymentCommand, SettlePaymentHandler, SettlementOutcome};
