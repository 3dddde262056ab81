//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Handlers take `Arc<dyn Port>` collaborators and return module errors
//! (`CustomerError`, `CatalogError`, `PaymentError`, `WebhookError`).

pub mod handlers;
