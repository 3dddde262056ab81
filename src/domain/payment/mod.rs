//! Payment domain module.
//!
//! Handles Paystack transaction initialization errors, webhook payloads,
//! and webhook signature verification.

mod errors;
mod paystack_event;
mod webhook_errors;
mod webhook_verifier;

pub use errors::PaymentError;
pub use paystack_event::{ChargeSuccess, PaystackEvent, CHARGE_SUCCESS};
pub use webhook_errors::WebhookError;
pub use webhook_verifier::{PaystackWebhookVerifier, SIGNATURE_HEADER};
