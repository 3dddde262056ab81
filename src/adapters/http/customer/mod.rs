//! HTTP adapter for customer endpoints.
//!
//! Registration, login, profile, measurements and the cart under `/customer`.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{CustomerApiError, CustomerAppState};
pub use routes::customer_router;
