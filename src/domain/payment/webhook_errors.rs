//! Webhook error types for Paystack webhook handling.
//!
//! Every failure maps to a single HTTP status; Paystack retries on
//! anything that is not a 2xx.

use http::StatusCode;
use thiserror::Error;

/// Errors that occur during webhook processing.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The `x-paystack-signature` header was not sent.
    #[error("Missing signature header")]
    MissingSignature,

    /// Signature did not match the HMAC of the body, or was not hex.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Failed to parse the webhook payload.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Required field missing from a `charge.success` payload.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// The referenced cart row does not exist.
    #[error("Unknown payment reference: {0}")]
    UnknownReference(String),

    /// Database operation failed; the transaction was rolled back.
    #[error("Database error: {0}")]
    Database(String),
}

impl WebhookError {
    /// Maps the error to an HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::MissingSignature
            | WebhookError::InvalidSignature
            | WebhookError::ParseError(_)
            | WebhookError::MissingField(_) => StatusCode::BAD_REQUEST,

            WebhookError::UnknownReference(_) => StatusCode::NOT_FOUND,

            WebhookError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code for the error body.
    pub fn code(&self) -> &'static str {
        match self {
            WebhookError::MissingSignature | WebhookError::InvalidSignature => {
                "INVALID_WEBHOOK_SIGNATURE"
            }
            WebhookError::ParseError(_) | WebhookError::MissingField(_) => "INVALID_PAYLOAD",
            WebhookError::UnknownReference(_) => "CART_ITEM_NOT_FOUND",
            WebhookError::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns true if Paystack redelivering the event could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WebhookError::Database(_))
    }
}
