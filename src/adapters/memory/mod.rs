//! In-memory repository adapters.
//!
//! Back every persistence port with `Arc<RwLock<HashMap>>` state. Used by
//! the HTTP integration tests and for running the service without Postgres.

mod cart_repository;
mod catalog_repository;
mod customer_repository;

pub use cart_repository::InMemoryCartRepository;
pub use catalog_repository::{
    InMemoryCategoryRepository, InMemoryFabricRepository, InMemoryProductRepository,
};
pub use customer_repository::{InMemoryCustomerRepository, InMemoryMeasurementRepository};
