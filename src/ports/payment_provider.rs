//! Payment provider port for external payment processing.
//!
//! Defines the contract for payment gateway integrations (Paystack).
//! Implementations start a hosted checkout for a single cart row; the
//! outcome arrives later through the webhook.

use crate::domain::foundation::{DomainError, ErrorCode};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for payment provider integrations.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Starts a transaction and returns the URL the customer pays at.
    async fn initialize_transaction(
        &self,
        request: InitializeTransactionRequest,
    ) -> Result<TransactionAuthorization, PaymentProviderError>;
}

/// Request to initialize a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitializeTransactionRequest {
    /// Email of the paying customer.
    pub email: String,

    /// Amount in minor currency units (kobo).
    pub amount: i64,

    /// Our reference, echoed back in the webhook.
    pub reference: String,

    /// Where the provider redirects after checkout, if configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}

/// Checkout details returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionAuthorization {
    /// URL for the customer to complete payment.
    pub authorization_url: String,

    /// Provider access code for inline checkout.
    pub access_code: String,

    /// Reference the provider recorded.
    pub reference: String,
}

/// Errors from payment provider operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentProviderError {
    /// Error code for categorization.
    pub code: PaymentProviderErrorCode,

    /// Human-readable message.
    pub message: String,
}

impl PaymentProviderError {
    pub fn new(code: PaymentProviderErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentProviderErrorCode::NetworkError, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(PaymentProviderErrorCode::AuthenticationError, message)
    }

    /// Create an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(PaymentProviderErrorCode::InvalidRequest, message)
    }

    /// Create an error for an unexpected provider response.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(PaymentProviderErrorCode::ProviderError, message)
    }
}

impl std::fmt::Display for PaymentProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentProviderError {}

impl From<PaymentProviderError> for DomainError {
    fn from(err: PaymentProviderError) -> Self {
        DomainError::new(ErrorCode::PaymentProviderError, err.message)
            .with_detail("provider_code", err.code.to_string())
    }
}

/// Payment provider error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentProviderErrorCode {
    /// Could not reach the provider.
    NetworkError,
    /// The secret key was rejected.
    AuthenticationError,
    /// The provider rejected the request body.
    InvalidRequest,
    /// Any other provider failure or unreadable response.
    ProviderError,
}

impl PaymentProviderErrorCode {
    /// Check if this error might succeed on retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PaymentProviderErrorCode::NetworkError)
    }
}

impl std::fmt::Display for PaymentProviderErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentProviderErrorCode::NetworkError => "network_error",
            PaymentProviderErrorCode::AuthenticationError => "authentication_error",
            PaymentProviderErrorCode::InvalidRequest => "invalid_request",
            PaymentProviderErrorCode::ProviderError => "provider_error",
        };
        write!(f, "{}", s)
    }
}
