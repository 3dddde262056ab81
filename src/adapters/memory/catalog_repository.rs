//! In-memory catalog repositories.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::catalog::{Category, Fabric, FabricPrice, Product};
use crate::domain::foundation::{CategoryId, DomainError, ErrorCode, FabricId, ProductId};
use crate::ports::{CategoryRepository, FabricRepository, ProductRepository};

#[derive(Debug, Clone, Default)]
pub struct InMemoryCategoryRepository {
    categories: Arc<RwLock<HashMap<CategoryId, Category>>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn create(&self, category: &Category) -> Result<(), DomainError> {
        let mut categories = self.categories.write().await;
        if categories
            .values()
            .any(|c| c.name.eq_ignore_ascii_case(&category.name))
        {
            return Err(DomainError::new(
                ErrorCode::CategoryExists,
                format!("category: {} exists", category.name),
            ));
        }
        categories.insert(category.id, category.clone());
        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, DomainError> {
        let name = name.trim();
        Ok(self
            .categories
            .read()
            .await
            .values()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, DomainError> {
        Ok(self.categories.read().await.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Category>, DomainError> {
        let mut all: Vec<Category> = self.categories.read().await.values().cloned().collect();
        all.sort_by_key(|c| c.name.to_lowercase());
        Ok(all)
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<ProductId, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored products
    pub async fn product_count(&self) -> usize {
        self.products.read().await.len()
    }
}

fn product_not_found(id: &ProductId) -> DomainError {
    DomainError::new(
        ErrorCode::ProductNotFound,
        format!("Product not found: {}", id),
    )
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: &Product) -> Result<(), DomainError> {
        self.products
            .write()
            .await
            .insert(product.id, product.clone());
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<(), DomainError> {
        let mut products = self.products.write().await;
        let existing = products
            .get_mut(&product.id)
            .ok_or_else(|| product_not_found(&product.id))?;
        *existing = product.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        Ok(self.products.read().await.get(id).cloned())
    }

    async fn list(&self, category: Option<&CategoryId>) -> Result<Vec<Product>, DomainError> {
        let mut all: Vec<Product> = self
            .products
            .read()
            .await
            .values()
            .filter(|p| category.map_or(true, |c| &p.category_id == c))
            .cloned()
            .collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn delete(&self, id: &ProductId) -> Result<(), DomainError> {
        self.products
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| product_not_found(id))
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryFabricRepository {
    fabrics: Arc<RwLock<HashMap<FabricId, Fabric>>>,
    prices: Arc<RwLock<HashMap<(FabricId, CategoryId), FabricPrice>>>,
}

impl InMemoryFabricRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FabricRepository for InMemoryFabricRepository {
    async fn create(&self, fabric: &Fabric) -> Result<(), DomainError> {
        self.fabrics.write().await.insert(fabric.id, fabric.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &FabricId) -> Result<Option<Fabric>, DomainError> {
        Ok(self.fabrics.read().await.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Fabric>, DomainError> {
        let mut all: Vec<Fabric> = self.fabrics.read().await.values().cloned().collect();
        all.sort_by_key(|f| f.name.to_lowercase());
        Ok(all)
    }

    async fn upsert_price(&self, price: &FabricPrice) -> Result<FabricPrice, DomainError> {
        let mut prices = self.prices.write().await;
        let stored = prices
            .entry((price.fabric_id, price.category_id))
            .and_modify(|existing| {
                existing.price = price.price;
                existing.updated_at = price.updated_at;
            })
            .or_insert_with(|| price.clone());
        Ok(stored.clone())
    }

    async fn list_prices(&self, fabric_id: &FabricId) -> Result<Vec<FabricPrice>, DomainError> {
        let mut all: Vec<FabricPrice> = self
            .prices
            .read()
            .await
            .values()
            .filter(|p| &p.fabric_id == fabric_id)
            .cloned()
            .collect();
        all.sort_by(|a, b| a.updated_at.cmp(&b.updated_at));
        Ok(all)
    }
}
