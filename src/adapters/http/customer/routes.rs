//! Axum router configuration for customer endpoints.

use axum::routing::{delete, get, post};
use axum::Router;

use super::handlers::{
    add_to_cart, get_measurement, get_profile, list_cart, login, register, remove_cart_item,
    update_profile, upload_measurement_images, upsert_measurement, CustomerAppState,
};

/// Create the customer API router, mounted at `/customer`.
///
/// # Routes
///
/// ## Public
/// - `POST /register` - Create a customer account
/// - `POST /login` - Exchange credentials for a bearer token
///
/// ## Signed in (customer or admin)
/// - `GET|PUT /me` - Read or update the caller's profile
/// - `GET|PUT /measurement` - Read or upsert body measurements
/// - `POST /measurement/images` - Upload measurement photos
/// - `GET|POST /cart` - List or add cart items
/// - `DELETE /cart/:id` - Remove an unpaid cart item
pub fn customer_routes() -> Router<CustomerAppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(get_profile).put(update_profile))
        .route("/measurement", get(get_measurement).put(upsert_measurement))
        .route("/measurement/images", post(upload_measurement_images))
        .route("/cart", get(list_cart).post(add_to_cart))
        .route("/cart/:id", delete(remove_cart_item))
}

/// Customer routes nested under `/customer`.
pub fn customer_router() -> Router<CustomerAppState> {
    Router::new().nest("/customer", customer_routes())
}
