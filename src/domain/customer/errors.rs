//! Customer-specific error types.
//!
//! Covers registration, login, profile, measurements and the cart.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | PhoneExists / EmailExists | 409 |
//! | PasswordMismatch / WeakPassword / ValidationFailed / InvalidImage | 400 |
//! | InvalidCredentials | 401 |
//! | CustomerNotFound / MeasurementNotFound / ProductNotFound / CartItemNotFound | 404 |
//! | CartItemAlreadyPaid | 409 |
//! | Storage / Infrastructure | 500 |

use super::password_policy::PASSWORD_POLICY_MESSAGE;
use crate::domain::foundation::{
    CartItemId, DomainError, ErrorCode, ProductId, UserId, ValidationError,
};
use crate::domain::media::ImageError;

/// Customer-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerError {
    /// A user with this phone number is already registered.
    PhoneExists(String),

    /// A user with this email is already registered.
    EmailExists(String),

    /// `password1` and `password2` differ.
    PasswordMismatch,

    /// Password fails the complexity policy.
    WeakPassword,

    /// Email/password pair did not match.
    InvalidCredentials,

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// An uploaded image could not be decoded.
    InvalidImage(ImageError),

    CustomerNotFound(UserId),

    /// The customer has not recorded any measurements yet.
    MeasurementNotFound(UserId),

    ProductNotFound(ProductId),

    /// Cart row missing or owned by someone else.
    CartItemNotFound(CartItemId),

    /// Paid cart rows cannot be removed.
    CartItemAlreadyPaid(CartItemId),

    /// Object storage failure.
    Storage(String),

    /// Persistence or other infrastructure failure.
    Infrastructure(String),
}

impl CustomerError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CustomerError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        CustomerError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CustomerError::PhoneExists(_) | CustomerError::EmailExists(_) => ErrorCode::UserExists,
            CustomerError::PasswordMismatch
            | CustomerError::WeakPassword
            | CustomerError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            CustomerError::InvalidCredentials => ErrorCode::Unauthorized,
            CustomerError::InvalidImage(_) => ErrorCode::InvalidImage,
            CustomerError::CustomerNotFound(_) => ErrorCode::UserNotFound,
            CustomerError::MeasurementNotFound(_) => ErrorCode::MeasurementNotFound,
            CustomerError::ProductNotFound(_) => ErrorCode::ProductNotFound,
            CustomerError::CartItemNotFound(_) => ErrorCode::CartItemNotFound,
            CustomerError::CartItemAlreadyPaid(_) => ErrorCode::AlreadyPaid,
            CustomerError::Storage(_) => ErrorCode::StorageError,
            CustomerError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            CustomerError::PhoneExists(phone) => format!("user with phone: {} exists", phone),
            CustomerError::EmailExists(email) => format!("user with email: {} exists", email),
            CustomerError::PasswordMismatch => "The two passwords did not match.".to_string(),
            CustomerError::WeakPassword => PASSWORD_POLICY_MESSAGE.to_string(),
            CustomerError::InvalidCredentials => "Incorrect email or password".to_string(),
            CustomerError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            CustomerError::InvalidImage(err) => err.to_string(),
            CustomerError::CustomerNotFound(id) => format!("Customer not found: {}", id),
            CustomerError::MeasurementNotFound(_) => "No measurement recorded yet".to_string(),
            CustomerError::ProductNotFound(id) => format!("Product not found: {}", id),
            CustomerError::CartItemNotFound(id) => format!("Cart item not found: {}", id),
            CustomerError::CartItemAlreadyPaid(id) => {
                format!("Cart item {} has already been paid", id)
            }
            CustomerError::Storage(msg) => format!("Storage error: {}", msg),
            CustomerError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for CustomerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CustomerError {}

impl From<ValidationError> for CustomerError {
    fn from(err: ValidationError) -> Self {
        CustomerError::validation(err.field().to_string(), err.to_string())
    }
}

impl From<ImageError> for CustomerError {
    fn from(err: ImageError) -> Self {
        CustomerError::InvalidImage(err)
    }
}

impl From<DomainError> for CustomerError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::StorageError => CustomerError::Storage(err.message),
            ErrorCode::ValidationFailed => CustomerError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => CustomerError::Infrastructure(err.to_string()),
        }
    }
}
