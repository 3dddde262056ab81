//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresCustomerRepository` - Users and customer profiles
//! - `PostgresMeasurementRepository` - Body measurements
//! - `PostgresCategoryRepository`, `PostgresProductRepository`,
//!   `PostgresFabricRepository` - Catalog
//! - `PostgresCartRepository` - Cart rows and payment settlement

mod cart_repository;
mod catalog_repository;
mod customer_repository;
mod measurement_repository;

pub use cart_repository::PostgresCartRepository;
pub use catalog_repository::{
    PostgresCategoryRepository, PostgresFabricRepository, PostgresProductRepository,
};
pub use customer_repository::PostgresCustomerRepository;
pub use measurement_repository::PostgresMeasurementRepository;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Wraps a sqlx error as a `DatabaseError` naming the failed action.
fn database_error(action: &str, e: sqlx::Error) -> DomainError {
    tracing::error!(action, error = %e, "Database operation failed");
    DomainError::new(ErrorCode::DatabaseError, format!("Failed to {}: {}", action, e))
}
