//! Axum router configuration for the public API.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    admin_activate_kill_switch, admin_block_customer, admin_deactivate_kill_switch,
    admin_record_revenue, admin_subscription_status, admin_unblock_customer, killswitch_query,
    paystack_webhook, run_cron_deactivation, submit_support_message, AppState,
};

/// Create the API router.
///
/// # Routes
///
/// ## Machine Endpoints (shared-secret auth)
/// - `POST /cron/deactivate` - run the expiry sweep (bearer token)
/// - `GET /killswitch` - access query from client sites (API key)
/// - `POST /webhooks/paystack` - payment notifications (HMAC signature)
/// - `POST /support-message` - ticket intake from client sites
///
/// ## Admin Endpoints (admin bearer token)
/// - `POST /admin/customers/:id/block` - manually block a customer
/// - `POST /admin/customers/:id/unblock` - manually unblock a customer
/// - `POST /admin/killswitch/activate` - activate the global kill switch
/// - `POST /admin/killswitch/deactivate` - deactivate the global kill switch
/// - `GET /admin/subscriptions/status` - read-only expiry report
/// - `POST /admin/revenue` - record a manual one-time revenue entry
///
/// Wrong-method requests get 405 from the router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/cron/deactivate", post(run_cron_deactivation))
        .route("/killswitch", get(killswitch_query))
        .route("/webhooks/paystack", post(paystack_webhook))
        .route("/support-message", post(submit_support_message))
        .nest("/admin", admin_router())
}

fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/customers/:id/block", post(admin_block_customer))
        .route("/customers/:id/unblock", post(admin_unblock_customer))
        .route("/killswitch/activate", post(admin_activate_kill_switch))
        .route("/killswitch/deactivate", post(admin_deactivate_kill_switch))
        .route("/subscriptions/status", get(admin_subscription_status))
        .route("/revenue", post(admin_record_revenue))
}
