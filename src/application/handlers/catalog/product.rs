//! Product handlers.

use std::sync::Arc;

use super::super::media::upload_images;
use super::category::resolve_category;
use crate::domain::catalog::{CatalogError, Product, ProductUpdate};
use crate::domain::foundation::{DomainError, ErrorCode, ProductId};
use crate::ports::{CartRepository, CategoryRepository, ObjectStorage, ProductRepository};

/// Storage area for product photos.
pub const PRODUCT_IMAGE_AREA: &str = "products";

fn not_found_or(err: DomainError, id: ProductId) -> CatalogError {
    if err.code == ErrorCode::ProductNotFound {
        CatalogError::ProductNotFound(id)
    } else {
        err.into()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Add
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct AddProductCommand {
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    /// Category name.
    pub category: String,
    pub stock_quantity: i32,
}

pub struct AddProductHandler {
    products: Arc<dyn ProductRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl AddProductHandler {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            products,
            categories,
        }
    }

    pub async fn handle(&self, cmd: AddProductCommand) -> Result<Product, CatalogError> {
        let category = resolve_category(self.categories.as_ref(), &cmd.category).await?;
        let product = Product::new(
            &cmd.name,
            cmd.price,
            cmd.description,
            category.id,
            cmd.stock_quantity,
        )?;

        self.products.create(&product).await?;
        tracing::info!(product_id = %product.id, category = %category.name, "Product added");
        Ok(product)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Queries
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default)]
pub struct ListProductsQuery {
    /// Optional category name filter.
    pub category: Option<String>,
}

pub struct ListProductsHandler {
    products: Arc<dyn ProductRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl ListProductsHandler {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            products,
            categories,
        }
    }

    /// An unknown category filter yields an empty list.
    pub async fn handle(&self, query: ListProductsQuery) -> Result<Vec<Product>, CatalogError> {
        let category = match query.category.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => match self.categories.find_by_name(name).await? {
                Some(category) => Some(category.id),
                None => return Ok(Vec::new()),
            },
            _ => None,
        };

        Ok(self.products.list(category.as_ref()).await?)
    }
}

#[derive(Debug, Clone)]
pub struct GetProductQuery {
    pub product_id: ProductId,
}

pub struct GetProductHandler {
    products: Arc<dyn ProductRepository>,
}

impl GetProductHandler {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    pub async fn handle(&self, query: GetProductQuery) -> Result<Product, CatalogError> {
        self.products
            .find_by_id(&query.product_id)
            .await?
            .ok_or(CatalogError::ProductNotFound(query.product_id))
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Update / delete
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct UpdateProductCommand {
    pub product_id: ProductId,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    /// New category name.
    pub category: Option<String>,
    pub stock_quantity: Option<i32>,
}

pub struct UpdateProductHandler {
    products: Arc<dyn ProductRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl UpdateProductHandler {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            products,
            categories,
        }
    }

    pub async fn handle(&self, cmd: UpdateProductCommand) -> Result<Product, CatalogError> {
        let mut product = self
            .products
            .find_by_id(&cmd.product_id)
            .await?
            .ok_or(CatalogError::ProductNotFound(cmd.product_id))?;

        let category_id = match cmd.category.as_deref() {
            Some(name) => Some(resolve_category(self.categories.as_ref(), name).await?.id),
            None => None,
        };

        product.apply(ProductUpdate {
            name: cmd.name,
            price: cmd.price,
            description: cmd.description,
            category_id,
            stock_quantity: cmd.stock_quantity,
        })?;

        self.products
            .update(&product)
            .await
            .map_err(|e| not_found_or(e, product.id))?;
        Ok(product)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteProductCommand {
    pub product_id: ProductId,
}

/// Deletes a product no cart row points at.
///
/// Cart rows are the only record of a payment, so a product that was ever
/// added to a cart stays.
pub struct DeleteProductHandler {
    products: Arc<dyn ProductRepository>,
    cart: Arc<dyn CartRepository>,
}

impl DeleteProductHandler {
    pub fn new(products: Arc<dyn ProductRepository>, cart: Arc<dyn CartRepository>) -> Self {
        Self { products, cart }
    }

    pub async fn handle(&self, cmd: DeleteProductCommand) -> Result<(), CatalogError> {
        if self.cart.references_product(&cmd.product_id).await? {
            return Err(CatalogError::ProductInUse(cmd.product_id));
        }

        self.products
            .delete(&cmd.product_id)
            .await
            .map_err(|e| match e.code {
                ErrorCode::ProductInUse => CatalogError::ProductInUse(cmd.product_id),
                _ => not_found_or(e, cmd.product_id),
            })?;
        tracing::info!(product_id = %cmd.product_id, "Product deleted");
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Images
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct UploadProductImagesCommand {
    pub product_id: ProductId,
    /// Base64 encoded images.
    pub images: Vec<String>,
}

pub struct UploadProductImagesHandler {
    products: Arc<dyn ProductRepository>,
    storage: Arc<dyn ObjectStorage>,
}

impl UploadProductImagesHandler {
    pub fn new(products: Arc<dyn ProductRepository>, storage: Arc<dyn ObjectStorage>) -> Self {
        Self { products, storage }
    }

    pub async fn handle(&self, cmd: UploadProductImagesCommand) -> Result<Product, CatalogError> {
        let mut product = self
            .products
            .find_by_id(&cmd.product_id)
            .await?
            .ok_or(CatalogError::ProductNotFound(cmd.product_id))?;

        let urls = upload_images::<CatalogError>(
            self.storage.as_ref(),
            PRODUCT_IMAGE_AREA,
            product.id,
            &cmd.images,
        )
        .await?;

        product.add_images(urls);
        self.products
            .update(&product)
            .await
            .map_err(|e| not_found_or(e, product.id))?;
        Ok(product)
    }
}
