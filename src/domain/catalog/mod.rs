//! Catalog domain module: categories, products, fabrics and fabric prices.

mod category;
mod errors;
mod fabric;
mod product;

pub use category::Category;
pub use errors::CatalogError;
pub use fabric::{Fabric, FabricPrice};
pub use product::{validate_price, Product, ProductUpdate, DEFAULT_STOCK_IMAGE_URL};
