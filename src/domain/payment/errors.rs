//! Payment-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | ReferenceNotFound | 404 |
//! | AlreadyPaid | 409 |
//! | ValidationFailed | 400 |
//! | Provider | 500 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised while initializing a payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// Reference is not a pending cart row owned by the caller.
    ReferenceNotFound(String),

    /// The referenced cart row has already been paid.
    AlreadyPaid(String),

    /// Request failed validation.
    ValidationFailed { field: String, message: String },

    /// The payment provider rejected the request or was unreachable.
    Provider(String),

    /// Persistence failure.
    Infrastructure(String),
}

impl PaymentError {
    pub fn reference_not_found(reference: impl Into<String>) -> Self {
        PaymentError::ReferenceNotFound(reference.into())
    }

    pub fn already_paid(reference: impl Into<String>) -> Self {
        PaymentError::AlreadyPaid(reference.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        PaymentError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn provider(message: impl Into<String>) -> Self {
        PaymentError::Provider(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        PaymentError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            PaymentError::ReferenceNotFound(_) => ErrorCode::CartItemNotFound,
            PaymentError::AlreadyPaid(_) => ErrorCode::AlreadyPaid,
            PaymentError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            PaymentError::Provider(_) => ErrorCode::PaymentProviderError,
            PaymentError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            PaymentError::ReferenceNotFound(reference) => {
                format!("No pending cart item with reference {}", reference)
            }
            PaymentError::AlreadyPaid(reference) => {
                format!("Cart item {} has already been paid", reference)
            }
            PaymentError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            PaymentError::Provider(msg) => format!("Payment provider error: {}", msg),
            PaymentError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for PaymentError {}

impl From<DomainError> for PaymentError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::PaymentProviderError => PaymentError::Provider(err.message),
            _ => PaymentError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_not_found_creates_correctly() {
        let err = PaymentError::reference_not_found("abc");
        assert_eq!(err.code(), ErrorCode::CartItemNotFound);
        assert!(err.message().contains("abc"));
    }

    #[test]
    fn already_paid_creates_correctly() {
        let err = PaymentError::already_paid("abc");
        assert_eq!(err.code(), ErrorCode::AlreadyPaid);
    }

    #[test]
    fn provider_domain_error_maps_to_provider() {
        let err: PaymentError =
            DomainError::new(ErrorCode::PaymentProviderError, "Invalid key").into();
        assert_eq!(err, PaymentError::Provider("Invalid key".to_string()));
    }

    #[test]
    fn database_domain_error_maps_to_infrastructure() {
        let err: PaymentError = DomainError::database("pool timed out").into();
        assert_eq!(err.code(), ErrorCode::DatabaseError);
    }
}
