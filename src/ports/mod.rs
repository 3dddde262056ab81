//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `CustomerRepository` - Users and customer profiles
//! - `MeasurementRepository` - Body measurements
//! - `CategoryRepository`, `ProductRepository`, `FabricRepository` - Catalog
//! - `CartRepository` - Cart rows and payment settlement
//!
//! ## External Service Ports
//!
//! - `PaymentProvider` - Transaction initialization (Paystack)
//! - `ObjectStorage` - Image uploads (S3-compatible)
//!
//! ## Auth Ports
//!
//! - `PasswordHasher` - Password hashing
//! - `SessionValidator` - Bearer token validation
//! - `TokenIssuer` - Bearer token issuing

mod cart_repository;
mod catalog_repository;
mod customer_repository;
mod measurement_repository;
mod object_storage;
mod password_hasher;
mod payment_provider;
mod session_validator;
mod token_issuer;

pub use cart_repository::CartRepository;
pub use catalog_repository::{CategoryRepository, FabricRepository, ProductRepository};
pub use customer_repository::CustomerRepository;
pub use measurement_repository::MeasurementRepository;
pub use object_storage::ObjectStorage;
pub use password_hasher::PasswordHasher;
pub use payment_provider::{
    InitializeTransactionRequest, PaymentProvider, PaymentProviderError, PaymentProviderErrorCode,
    TransactionAuthorization,
};
pub use session_validator::SessionValidator;
pub use token_issuer::{IssuedToken, TokenIssuer};
