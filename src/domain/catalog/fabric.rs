//! Fabrics and their per-category prices.

use serde::Serialize;

use super::errors::CatalogError;
use super::product::{validate_price, validate_product_name};
use crate::domain::foundation::{CategoryId, FabricId, FabricPriceId, Timestamp};

/// A fabric a garment can be sewn from, with its base price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fabric {
    pub id: FabricId,
    pub name: String,
    pub price: f64,
    /// Free-form grouping, e.g. "Lace" or "Cotton".
    pub category: Option<String>,
    pub images: Vec<String>,
    pub created_at: Timestamp,
}

impl Fabric {
    pub fn new(name: &str, price: f64, category: Option<String>) -> Result<Self, CatalogError> {
        Ok(Self {
            id: FabricId::new(),
            name: validate_product_name(name)?,
            price: validate_price("price", price)?,
            category: category
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            images: Vec::new(),
            created_at: Timestamp::now(),
        })
    }
}

/// Price of a fabric when used for a given product category.
///
/// At most one per (fabric, category) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FabricPrice {
    pub id: FabricPriceId,
    pub fabric_id: FabricId,
    pub category_id: CategoryId,
    pub price: f64,
    pub updated_at: Timestamp,
}

impl FabricPrice {
    pub fn new(
        fabric_id: FabricId,
        category_id: CategoryId,
        price: f64,
    ) -> Result<Self, CatalogError> {
        Ok(Self {
            id: FabricPriceId::new(),
            fabric_id,
            category_id,
            price: validate_price("price", price)?,
            updated_at: Timestamp::now(),
        })
    }
}
