//! Axum router configuration for catalog endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    add_product, create_category, create_fabric, delete_product, get_product, list_categories,
    list_fabric_prices, list_fabrics, list_products, set_fabric_price, update_product,
    upload_product_images, ProductAppState,
};

/// Create the catalog router, mounted at `/product`.
///
/// # Routes
///
/// ## Public
/// - `GET /` - List products, optionally `?category=<name>`
/// - `GET /categories`, `GET /fabrics`, `GET /fabrics/:id/prices`
/// - `GET /:id` - Product details
///
/// ## Admin
/// - `POST /add_product`, `POST /categories`, `POST /fabrics`
/// - `PUT|DELETE /:id`, `POST /:id/images`
/// - `PUT /fabrics/:id/prices` - Upsert a fabric price for a category
pub fn product_routes() -> Router<ProductAppState> {
    Router::new()
        .route("/", get(list_products))
        .route("/add_product", post(add_product))
        .route("/categories", get(list_categories).post(create_category))
        .route("/fabrics", get(list_fabrics).post(create_fabric))
        .route(
            "/fabrics/:id/prices",
            get(list_fabric_prices).put(set_fabric_price),
        )
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/:id/images", post(upload_product_images))
}

/// Catalog routes nested under `/product`.
pub fn product_router() -> Router<ProductAppState> {
    Router::new().nest("/product", product_routes())
}
