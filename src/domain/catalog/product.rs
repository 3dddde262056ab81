//! Catalog products.

use serde::Serialize;

use super::errors::CatalogError;
use crate::domain::foundation::{CategoryId, ProductId, Timestamp, ValidationError};

/// Placeholder image every product starts with until real photos are uploaded.
pub const DEFAULT_STOCK_IMAGE_URL: &str = "https://images.unsplash.com/photo-1629367494173-c78a56567877?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=927&q=80";

/// Longest product or fabric name accepted.
pub const MAX_PRODUCT_NAME_LEN: usize = 128;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub category_id: CategoryId,
    pub stock_quantity: i32,
    pub images: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Partial product edit. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub category_id: Option<CategoryId>,
    pub stock_quantity: Option<i32>,
}

impl Product {
    /// Creates a product with the stock placeholder image.
    pub fn new(
        name: &str,
        price: f64,
        description: Option<String>,
        category_id: CategoryId,
        stock_quantity: i32,
    ) -> Result<Self, CatalogError> {
        let now = Timestamp::now();
        Ok(Self {
            id: ProductId::new(),
            name: validate_product_name(name)?,
            price: validate_price("price", price)?,
            description: normalize_description(description),
            category_id,
            stock_quantity: validate_stock(stock_quantity)?,
            images: vec![DEFAULT_STOCK_IMAGE_URL.to_string()],
            created_at: now,
            updated_at: now,
        })
    }

    /// Validates every supplied field, then applies them all.
    pub fn apply(&mut self, update: ProductUpdate) -> Result<(), CatalogError> {
        let name = update
            .name
            .as_deref()
            .map(validate_product_name)
            .transpose()?;
        let price = update
            .price
            .map(|p| validate_price("price", p))
            .transpose()?;
        let stock = update.stock_quantity.map(validate_stock).transpose()?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(price) = price {
            self.price = price;
        }
        if update.description.is_some() {
            self.description = normalize_description(update.description);
        }
        if let Some(category_id) = update.category_id {
            self.category_id = category_id;
        }
        if let Some(stock) = stock {
            self.stock_quantity = stock;
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Returns true while the product only has the placeholder image.
    pub fn has_only_stock_image(&self) -> bool {
        self.images.len() == 1 && self.images[0] == DEFAULT_STOCK_IMAGE_URL
    }

    /// Adds uploaded image URLs.
    ///
    /// The first upload replaces the placeholder; later uploads append.
    pub fn add_images(&mut self, urls: Vec<String>) {
        if self.has_only_stock_image() {
            self.images = urls;
        } else {
            self.images.extend(urls);
        }
        self.updated_at = Timestamp::now();
    }
}

/// Trims a name and checks its length.
pub fn validate_product_name(name: &str) -> Result<String, CatalogError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::empty_field("name").into());
    }
    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(CatalogError::validation(
            "name",
            format!("must be at most {} characters", MAX_PRODUCT_NAME_LEN),
        ));
    }
    Ok(name.to_string())
}

/// Prices must be finite and strictly positive.
pub fn validate_price(field: &str, price: f64) -> Result<f64, CatalogError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(CatalogError::validation(field, "must be greater than 0"));
    }
    Ok(price)
}

fn validate_stock(stock: i32) -> Result<i32, CatalogError> {
    if stock < 0 {
        return Err(CatalogError::validation(
            "stock_quantity",
            "cannot be negative",
        ));
    }
    Ok(stock)
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product::new(
            "Ankara Shirt",
            15000.0,
            Some("Short sleeve".to_string()),
            CategoryId::new(),
            5,
        )
        .unwrap()
    }

    #[test]
    fn new_product_has_stock_image() {
        let p = product();
        assert_eq!(p.images, vec![DEFAULT_STOCK_IMAGE_URL.to_string()]);
        assert!(p.has_only_stock_image());
    }

    #[test]
    fn zero_price_is_rejected() {
        let result = Product::new("Shirt", 0.0, None, CategoryId::new(), 1);
        assert!(matches!(
            result,
            Err(CatalogError::ValidationFailed { ref field, .. }) if field == "price"
        ));
    }

    #[test]
    fn negative_stock_is_rejected() {
        let result = Product::new("Shirt", 10.0, None, CategoryId::new(), -1);
        assert!(result.is_err());
    }

    #[test]
    fn zero_stock_is_allowed() {
        assert!(Product::new("Shirt", 10.0, None, CategoryId::new(), 0).is_ok());
    }

    #[test]
    fn first_upload_replaces_stock_image() {
        let mut p = product();
        p.add_images(vec!["https://cdn/a.png".to_string()]);
        assert_eq!(p.images, vec!["https://cdn/a.png".to_string()]);
    }

    #[test]
    fn later_uploads_append() {
        let mut p = product();
        p.add_images(vec!["https://cdn/a.png".to_string()]);
        p.add_images(vec!["https://cdn/b.png".to_string()]);
        assert_eq!(p.images.len(), 2);
        assert_eq!(p.images[1], "https://cdn/b.png");
    }

    #[test]
    fn apply_is_all_or_nothing() {
        let mut p = product();
        let result = p.apply(ProductUpdate {
            name: Some("Renamed".to_string()),
            price: Some(-5.0),
            ..Default::default()
        });
        assert!(result.is_err());
        assert_eq!(p.name, "Ankara Shirt");
    }

    #[test]
    fn apply_updates_supplied_fields() {
        let mut p = product();
        p.apply(ProductUpdate {
            stock_quantity: Some(12),
            description: Some("  ".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(p.stock_quantity, 12);
        assert_eq!(p.description, None);
        assert_eq!(p.price, 15000.0);
    }
}
