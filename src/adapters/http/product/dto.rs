//! HTTP DTOs for catalog endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{Category, Fabric, FabricPrice, Product};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
}

/// New product. `category` is the category name.
#[derive(Debug, Clone, Deserialize)]
pub struct AddProductRequest {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    #[serde(default)]
    pub stock_quantity: i32,
}

/// Partial product update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub stock_quantity: Option<i32>,
}

/// `GET /product?category=<name>`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListProductsParams {
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImagesRequest {
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateFabricRequest {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetFabricPriceRequest {
    /// Product category name.
    pub category: String,
    pub price: f64,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub created_at: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name,
            created_at: category.created_at.as_datetime().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub category_id: String,
    pub stock_quantity: i32,
    pub images: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name,
            price: product.price,
            description: product.description,
            category_id: product.category_id.to_string(),
            stock_quantity: product.stock_quantity,
            images: product.images,
            created_at: product.created_at.as_datetime().to_rfc3339(),
            updated_at: product.updated_at.as_datetime().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FabricResponse {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub category: Option<String>,
    pub images: Vec<String>,
    pub created_at: String,
}

impl From<Fabric> for FabricResponse {
    fn from(fabric: Fabric) -> Self {
        Self {
            id: fabric.id.to_string(),
            name: fabric.name,
            price: fabric.price,
            category: fabric.category,
            images: fabric.images,
            created_at: fabric.created_at.as_datetime().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FabricPriceResponse {
    pub id: String,
    pub fabric_id: String,
    pub category_id: String,
    pub price: f64,
    pub updated_at: String,
}

impl From<FabricPrice> for FabricPriceResponse {
    fn from(price: FabricPrice) -> Self {
        Self {
            id: price.id.to_string(),
            fabric_id: price.fabric_id.to_string(),
            category_id: price.category_id.to_string(),
            price: price.price,
            updated_at: price.updated_at.as_datetime().to_rfc3339(),
        }
    }
}
