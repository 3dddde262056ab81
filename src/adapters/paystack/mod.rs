//! Paystack payment provider adapter.
//!
//! Implements the `PaymentProvider` port for Paystack:
//! - Transaction initialization (hosted checkout)
//!
//! Webhook signatures are verified in the domain by
//! `PaystackWebhookVerifier`, keyed with the same secret key.
//!
//! # Security
//!
//! - The secret key is handled via `secrecy::SecretString`

mod mock_payment_provider;
mod paystack_adapter;

pub use mock_payment_provider::MockPaymentProvider;
pub use paystack_adapter::{PaystackConfig, PaystackPaymentAdapter, DEFAULT_PAYSTACK_BASE_URL};
