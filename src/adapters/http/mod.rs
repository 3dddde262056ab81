//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure.
//! `router::api_router` merges them under the shared middleware stack.

pub mod customer;
pub mod error;
pub mod health;
pub mod middleware;
pub mod payment;
pub mod product;
pub mod router;

// Re-export key types for convenience
pub use customer::{customer_router, CustomerAppState};
pub use error::ErrorResponse;
pub use payment::{payment_router, PaymentAppState};
pub use product::{product_router, ProductAppState};
pub use router::{api_router, AppState, HttpSettings};
