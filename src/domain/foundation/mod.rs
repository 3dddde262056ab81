//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, auth types, and error types
//! that form the vocabulary of the tailor shop domain.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser, Role};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{CartItemId, CategoryId, FabricId, FabricPriceId, ProductId, UserId};
pub use timestamp::Timestamp;
