//! Payment handlers.
//!
//! ## Commands
//! - Initializing a Paystack transaction for a cart row
//! - Processing Paystack webhooks

mod handle_webhook;
mod initialize_transaction;

pub use handle_webhook::{
    HandlePaystackWebhookCommand, HandlePaystackWebhookHandler, HandlePaystackWebhookResult,
};
pub use initialize_transaction::{InitializeTransactionCommand, InitializeTransactionHandler};
