//! Axum router configuration for payment endpoints.

use axum::routing::post;
use axum::Router;

use super::handlers::{initialize_transaction, paystack_webhook, PaymentAppState};

/// Create the payment router, mounted at `/payment`.
///
/// # Routes
/// - `POST /initialize-transactions` - Start a Paystack checkout (signed in)
/// - `POST /webhook` - Paystack events (no auth, signature verified)
pub fn payment_routes() -> Router<PaymentAppState> {
    Router::new()
        .route("/initialize-transactions", post(initialize_transaction))
        .route("/webhook", post(paystack_webhook))
}

/// Payment routes nested under `/payment`.
pub fn payment_router() -> Router<PaymentAppState> {
    Router::new().nest("/payment", payment_routes())
}
