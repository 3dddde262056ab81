//! Catalog repository ports: categories, products and fabrics.

use crate::domain::catalog::{Category, Fabric, FabricPrice, Product};
use crate::domain::foundation::{CategoryId, DomainError, FabricId, ProductId};
use async_trait::async_trait;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Save a new category.
    ///
    /// # Errors
    ///
    /// - `CategoryExists` if the name is taken (case-insensitive)
    async fn create(&self, category: &Category) -> Result<(), DomainError>;

    /// Case-insensitive lookup by name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, DomainError>;

    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, DomainError>;

    /// All categories ordered by name.
    async fn list(&self) -> Result<Vec<Category>, DomainError>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, product: &Product) -> Result<(), DomainError>;

    /// Persists an edited product.
    ///
    /// # Errors
    ///
    /// - `ProductNotFound` if it was deleted in the meantime
    async fn update(&self, product: &Product) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError>;

    /// Products newest first, optionally restricted to one category.
    async fn list(&self, category: Option<&CategoryId>) -> Result<Vec<Product>, DomainError>;

    /// # Errors
    ///
    /// - `ProductNotFound` if no such product
    async fn delete(&self, id: &ProductId) -> Result<(), DomainError>;
}

#[async_trait]
pub trait FabricRepository: Send + Sync {
    async fn create(&self, fabric: &Fabric) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &FabricId) -> Result<Option<Fabric>, DomainError>;

    /// All fabrics ordered by name.
    async fn list(&self) -> Result<Vec<Fabric>, DomainError>;

    /// Inserts the price, or updates the existing one for the same
    /// (fabric, category) pair. Returns the stored row.
    async fn upsert_price(&self, price: &FabricPrice) -> Result<FabricPrice, DomainError>;

    async fn list_prices(&self, fabric_id: &FabricId) -> Result<Vec<FabricPrice>, DomainError>;
}
