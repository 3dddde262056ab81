//! Catalog handlers.
//!
//! ## Commands (admin only at the HTTP layer)
//! - Creating categories, products and fabrics
//! - Updating and deleting products, uploading product photos
//! - Setting fabric prices per product category
//!
//! ## Queries
//! - Listing categories, products, fabrics and fabric prices

mod category;
mod fabric;
mod product;

pub use category::{CreateCategoryCommand, CreateCategoryHandler, ListCategoriesHandler};
pub use fabric::{
    CreateFabricCommand, CreateFabricHandler, ListFabricPricesHandler, ListFabricPricesQuery,
    ListFabricsHandler, SetFabricPriceCommand, SetFabricPriceHandler,
};
pub use product::{
    AddProductCommand, AddProductHandler, DeleteProductCommand, DeleteProductHandler,
    GetProductHandler, GetProductQuery, ListProductsHandler, ListProductsQuery,
    UpdateProductCommand, UpdateProductHandler, UploadProductImagesCommand,
    UploadProductImagesHandler, PRODUCT_IMAGE_AREA,
};
