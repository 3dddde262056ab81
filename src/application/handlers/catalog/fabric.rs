//! Fabric handlers, including per-category fabric prices.

use std::sync::Arc;

use super::category::resolve_category;
use crate::domain::catalog::{CatalogError, Fabric, FabricPrice};
use crate::domain::foundation::FabricId;
use crate::ports::{CategoryRepository, FabricRepository};

#[derive(Debug, Clone)]
pub struct CreateFabricCommand {
    pub name: String,
    pub price: f64,
    pub category: Option<String>,
}

pub struct CreateFabricHandler {
    fabrics: Arc<dyn FabricRepository>,
}

impl CreateFabricHandler {
    pub fn new(fabrics: Arc<dyn FabricRepository>) -> Self {
        Self { fabrics }
    }

    pub async fn handle(&self, cmd: CreateFabricCommand) -> Result<Fabric, CatalogError> {
        let fabric = Fabric::new(&cmd.name, cmd.price, cmd.category)?;
        self.fabrics.create(&fabric).await?;
        Ok(fabric)
    }
}

pub struct ListFabricsHandler {
    fabrics: Arc<dyn FabricRepository>,
}

impl ListFabricsHandler {
    pub fn new(fabrics: Arc<dyn FabricRepository>) -> Self {
        Self { fabrics }
    }

    pub async fn handle(&self) -> Result<Vec<Fabric>, CatalogError> {
        Ok(self.fabrics.list().await?)
    }
}

/// Sets the price of a fabric for one product category.
#[derive(Debug, Clone)]
pub struct SetFabricPriceCommand {
    pub fabric_id: FabricId,
    /// Category name.
    pub category: String,
    pub price: f64,
}

pub struct SetFabricPriceHandler {
    fabrics: Arc<dyn FabricRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl SetFabricPriceHandler {
    pub fn new(fabrics: Arc<dyn FabricRepository>, categories: Arc<dyn CategoryRepository>) -> Self {
        Self {
            fabrics,
            categories,
        }
    }

    pub async fn handle(&self, cmd: SetFabricPriceCommand) -> Result<FabricPrice, CatalogError> {
        if self.fabrics.find_by_id(&cmd.fabric_id).await?.is_none() {
            return Err(CatalogError::FabricNotFound(cmd.fabric_id));
        }
        let category = resolve_category(self.categories.as_ref(), &cmd.category).await?;

        let price = FabricPrice::new(cmd.fabric_id, category.id, cmd.price)?;
        Ok(self.fabrics.upsert_price(&price).await?)
    }
}

#[derive(Debug, Clone)]
pub struct ListFabricPricesQuery {
    pub fabric_id: FabricId,
}

pub struct ListFabricPricesHandler {
    fabrics: Arc<dyn FabricRepository>,
}

impl ListFabricPricesHandler {
    pub fn new(fabrics: Arc<dyn FabricRepository>) -> Self {
        Self { fabrics }
    }

    pub async fn handle(
        &self,
        query: ListFabricPricesQuery,
    ) -> Result<Vec<FabricPrice>, CatalogError> {
        if self.fabrics.find_by_id(&query.fabric_id).await?.is_none() {
            return Err(CatalogError::FabricNotFound(query.fabric_id));
        }
        Ok(self.fabrics.list_prices(&query.fabric_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryCategoryRepository, InMemoryFabricRepository};
    use crate::domain::catalog::Category;

    async fn setup() -> (Arc<InMemoryFabricRepository>, Arc<InMemoryCategoryRepository>, Fabric) {
        let fabrics = Arc::new(InMemoryFabricRepository::new());
        let categories = Arc::new(InMemoryCategoryRepository::new());
        categories.create(&Category::new("Agbada").unwrap()).await.unwrap();
        let fabric = CreateFabricHandler::new(fabrics.clone())
            .handle(CreateFabricCommand {
                name: "Swiss Voile".to_string(),
                price: 8000.0,
                category: Some("Lace".to_string()),
            })
            .await
            .unwrap();
        (fabrics, categories, fabric)
    }

    #[tokio::test]
    async fn create_and_list_fabrics() {
        let (fabrics, _, fabric) = setup().await;
        let listed = ListFabricsHandler::new(fabrics).handle().await.unwrap();
        assert_eq!(listed, vec![fabric]);
    }

    #[tokio::test]
    async fn set_price_upserts_per_category() {
        let (fabrics, categories, fabric) = setup().await;
        let handler = SetFabricPriceHandler::new(fabrics.clone(), categories);

        for price in [12000.0, 15000.0] {
            handler
                .handle(SetFabricPriceCommand {
                    fabric_id: fabric.id,
                    category: "agbada".to_string(),
                    price,
                })
                .await
                .unwrap();
        }

        let prices = ListFabricPricesHandler::new(fabrics)
            .handle(ListFabricPricesQuery {
                fabric_id: fabric.id,
            })
            .await
            .unwrap();
        assert_eq!(prices.len(), 1);
        assert_eq!(prices[0].price, 15000.0);
    }

    #[tokio::test]
    async fn set_price_for_unknown_fabric_is_not_found() {
        let (fabrics, categories, _) = setup().await;
        let missing = FabricId::new();
        let err = SetFabricPriceHandler::new(fabrics, categories)
            .handle(SetFabricPriceCommand {
                fabric_id: missing,
                category: "Agbada".to_string(),
                price: 100.0,
            })
            .await
            .unwrap_err();
        assert_eq!(err, CatalogError::FabricNotFound(missing));
    }

    #[tokio::test]
    async fn set_price_for_unknown_category_is_not_found() {
        let (fabrics, categories, fabric) = setup().await;
        let err = SetFabricPriceHandler::new(fabrics, categories)
            .handle(SetFabricPriceCommand {
                fabric_id: fabric.id,
                category: "Suit".to_string(),
                price: 100.0,
            })
            .await
            .unwrap_err();
        assert_eq!(err, CatalogError::category_not_found("Suit"));
    }
}
