//! HTTP adapter for the catalog under `/product`.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{CatalogApiError, ProductAppState};
pub use routes::product_router;
