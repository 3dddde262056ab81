//! Catalog-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | CategoryExists / ProductInUse | 409 |
//! | CategoryNotFound / ProductNotFound / FabricNotFound | 404 |
//! | ValidationFailed / InvalidImage | 400 |
//! | Storage / Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, FabricId, ProductId, ValidationError};
use crate::domain::media::ImageError;

/// Catalog-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A category with this name already exists.
    CategoryExists(String),

    /// No category with this name.
    CategoryNotFound(String),

    ProductNotFound(ProductId),

    /// Cart rows still reference the product.
    ProductInUse(ProductId),

    FabricNotFound(FabricId),

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// An uploaded image could not be decoded.
    InvalidImage(ImageError),

    /// Object storage failure.
    Storage(String),

    /// Persistence failure.
    Infrastructure(String),
}

impl CatalogError {
    pub fn category_not_found(name: impl Into<String>) -> Self {
        CatalogError::CategoryNotFound(name.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CatalogError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        CatalogError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CatalogError::CategoryExists(_) => ErrorCode::CategoryExists,
            CatalogError::CategoryNotFound(_) => ErrorCode::CategoryNotFound,
            CatalogError::ProductNotFound(_) => ErrorCode::ProductNotFound,
            CatalogError::ProductInUse(_) => ErrorCode::ProductInUse,
            CatalogError::FabricNotFound(_) => ErrorCode::FabricNotFound,
            CatalogError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            CatalogError::InvalidImage(_) => ErrorCode::InvalidImage,
            CatalogError::Storage(_) => ErrorCode::StorageError,
            CatalogError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            CatalogError::CategoryExists(name) => format!("category: {} exists", name),
            CatalogError::CategoryNotFound(name) => format!("Category not found: {}", name),
            CatalogError::ProductNotFound(id) => format!("Product not found: {}", id),
            CatalogError::ProductInUse(id) => {
                format!("Product {} is referenced by cart items", id)
            }
            CatalogError::FabricNotFound(id) => format!("Fabric not found: {}", id),
            CatalogError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            CatalogError::InvalidImage(err) => err.to_string(),
            CatalogError::Storage(msg) => format!("Storage error: {}", msg),
            CatalogError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CatalogError {}

impl From<ValidationError> for CatalogError {
    fn from(err: ValidationError) -> Self {
        CatalogError::validation(err.field().to_string(), err.to_string())
    }
}

impl From<ImageError> for CatalogError {
    fn from(err: ImageError) -> Self {
        CatalogError::InvalidImage(err)
    }
}

impl From<DomainError> for CatalogError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::StorageError => CatalogError::Storage(err.message),
            _ => CatalogError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_exists_is_conflict_code() {
        let err = CatalogError::CategoryExists("Agbada".to_string());
        assert_eq!(err.code(), ErrorCode::CategoryExists);
        assert!(err.message().contains("Agbada"));
    }

    #[test]
    fn category_not_found_names_category() {
        let err = CatalogError::category_not_found("Kaftan");
        assert_eq!(err.message(), "Category not found: Kaftan");
    }

    #[test]
    fn invalid_image_carries_index() {
        let err: CatalogError = ImageError::UnsupportedFormat { index: 3 }.into();
        assert!(err.message().contains("index 3"));
    }

    #[test]
    fn database_error_maps_to_infrastructure() {
        let err: CatalogError = DomainError::database("timeout").into();
        assert_eq!(err.code(), ErrorCode::DatabaseError);
    }
}
