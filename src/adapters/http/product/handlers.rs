//! HTTP handlers for catalog endpoints.
//!
//! Reads are public; writes require an admin token.

use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::adapters::http::error::{
    domain_error_body, field_details, image_details, log_server_error,
};
use crate::adapters::http::middleware::RequireAdmin;
use crate::application::handlers::catalog::{
    AddProductCommand, AddProductHandler, CreateCategoryCommand, CreateCategoryHandler,
    CreateFabricCommand, CreateFabricHandler, DeleteProductCommand, DeleteProductHandler,
    GetProductHandler, GetProductQuery, ListCategoriesHandler, ListFabricPricesHandler,
    ListFabricPricesQuery, ListFabricsHandler, ListProductsHandler, ListProductsQuery,
    SetFabricPriceCommand, SetFabricPriceHandler, UpdateProductCommand, UpdateProductHandler,
    UploadProductImagesCommand, UploadProductImagesHandler,
};
use crate::domain::catalog::CatalogError;
use crate::domain::foundation::{FabricId, ProductId};
use crate::ports::{
    CartRepository, CategoryRepository, FabricRepository, ObjectStorage, ProductRepository,
};

use super::dto::{
    AddProductRequest, CategoryResponse, CreateCategoryRequest, CreateFabricRequest,
    FabricPriceResponse, FabricResponse, ImagesRequest, ListProductsParams, ProductResponse,
    SetFabricPriceRequest, UpdateProductRequest,
};

/// Dependencies for the catalog routes.
#[derive(Clone)]
pub struct ProductAppState {
    pub categories: Arc<dyn CategoryRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub fabrics: Arc<dyn FabricRepository>,
    pub cart: Arc<dyn CartRepository>,
    pub storage: Arc<dyn ObjectStorage>,
}

impl ProductAppState {
    fn products_with_categories(
        &self,
    ) -> (Arc<dyn ProductRepository>, Arc<dyn CategoryRepository>) {
        (self.products.clone(), self.categories.clone())
    }
}

fn parse_product_id(raw: &str) -> Result<ProductId, CatalogError> {
    raw.parse()
        .map_err(|_| CatalogError::validation("id", "not a valid product id"))
}

fn parse_fabric_id(raw: &str) -> Result<FabricId, CatalogError> {
    raw.parse()
        .map_err(|_| CatalogError::validation("id", "not a valid fabric id"))
}

// ════════════════════════════════════════════════════════════════════════════════
// Categories
// ════════════════════════════════════════════════════════════════════════════════

/// POST /product/categories
pub async fn create_category(
    State(state): State<ProductAppState>,
    _admin: RequireAdmin,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let category = CreateCategoryHandler::new(state.categories.clone())
        .handle(CreateCategoryCommand { name: request.name })
        .await?;

    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}

/// GET /product/categories
pub async fn list_categories(
    State(state): State<ProductAppState>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let categories = ListCategoriesHandler::new(state.categories.clone())
        .handle()
        .await?;

    let response: Vec<CategoryResponse> =
        categories.into_iter().map(CategoryResponse::from).collect();
    Ok(Json(response))
}

// ════════════════════════════════════════════════════════════════════════════════
// Products
// ════════════════════════════════════════════════════════════════════════════════

/// POST /product/add_product
pub async fn add_product(
    State(state): State<ProductAppState>,
    _admin: RequireAdmin,
    Json(request): Json<AddProductRequest>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let (products, categories) = state.products_with_categories();
    let product = AddProductHandler::new(products, categories)
        .handle(AddProductCommand {
            name: request.name,
            price: request.price,
            description: request.description,
            category: request.category,
            stock_quantity: request.stock_quantity,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

/// GET /product?category=<name>
pub async fn list_products(
    State(state): State<ProductAppState>,
    Query(params): Query<ListProductsParams>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let (products, categories) = state.products_with_categories();
    let products = ListProductsHandler::new(products, categories)
        .handle(ListProductsQuery {
            category: params.category,
        })
        .await?;

    let response: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();
    Ok(Json(response))
}

/// GET /product/{id}
pub async fn get_product(
    State(state): State<ProductAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let product = GetProductHandler::new(state.products.clone())
        .handle(GetProductQuery {
            product_id: parse_product_id(&id)?,
        })
        .await?;

    Ok(Json(ProductResponse::from(product)))
}

/// PUT /product/{id}
pub async fn update_product(
    State(state): State<ProductAppState>,
    _admin: RequireAdmin,
    Path(id): Path<String>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let (products, categories) = state.products_with_categories();
    let product = UpdateProductHandler::new(products, categories)
        .handle(UpdateProductCommand {
            product_id: parse_product_id(&id)?,
            name: request.name,
            price: request.price,
            description: request.description,
            category: request.category,
            stock_quantity: request.stock_quantity,
        })
        .await?;

    Ok(Json(ProductResponse::from(product)))
}

/// DELETE /product/{id}
pub async fn delete_product(
    State(state): State<ProductAppState>,
    _admin: RequireAdmin,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, CatalogApiError> {
    DeleteProductHandler::new(state.products.clone(), state.cart.clone())
        .handle(DeleteProductCommand {
            product_id: parse_product_id(&id)?,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /product/{id}/images
pub async fn upload_product_images(
    State(state): State<ProductAppState>,
    _admin: RequireAdmin,
    Path(id): Path<String>,
    Json(request): Json<ImagesRequest>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let product = UploadProductImagesHandler::new(state.products.clone(), state.storage.clone())
        .handle(UploadProductImagesCommand {
            product_id: parse_product_id(&id)?,
            images: request.images,
        })
        .await?;

    Ok(Json(ProductResponse::from(product)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Fabrics
// ════════════════════════════════════════════════════════════════════════════════

/// POST /product/fabrics
pub async fn create_fabric(
    State(state): State<ProductAppState>,
    _admin: RequireAdmin,
    Json(request): Json<CreateFabricRequest>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let fabric = CreateFabricHandler::new(state.fabrics.clone())
        .handle(CreateFabricCommand {
            name: request.name,
            price: request.price,
            category: request.category,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(FabricResponse::from(fabric))))
}

/// GET /product/fabrics
pub async fn list_fabrics(
    State(state): State<ProductAppState>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let fabrics = ListFabricsHandler::new(state.fabrics.clone()).handle().await?;

    let response: Vec<FabricResponse> = fabrics.into_iter().map(FabricResponse::from).collect();
    Ok(Json(response))
}

/// PUT /product/fabrics/{id}/prices
pub async fn set_fabric_price(
    State(state): State<ProductAppState>,
    _admin: RequireAdmin,
    Path(id): Path<String>,
    Json(request): Json<SetFabricPriceRequest>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let price = SetFabricPriceHandler::new(state.fabrics.clone(), state.categories.clone())
        .handle(SetFabricPriceCommand {
            fabric_id: parse_fabric_id(&id)?,
            category: request.category,
            price: request.price,
        })
        .await?;

    Ok(Json(FabricPriceResponse::from(price)))
}

/// GET /product/fabrics/{id}/prices
pub async fn list_fabric_prices(
    State(state): State<ProductAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let prices = ListFabricPricesHandler::new(state.fabrics.clone())
        .handle(ListFabricPricesQuery {
            fabric_id: parse_fabric_id(&id)?,
        })
        .await?;

    let response: Vec<FabricPriceResponse> =
        prices.into_iter().map(FabricPriceResponse::from).collect();
    Ok(Json(response))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts catalog errors to HTTP responses.
#[derive(Debug)]
pub struct CatalogApiError(CatalogError);

impl From<CatalogError> for CatalogApiError {
    fn from(err: CatalogError) -> Self {
        Self(err)
    }
}

impl CatalogApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            CatalogError::CategoryExists(_) | CatalogError::ProductInUse(_) => {
                StatusCode::CONFLICT
            }
            CatalogError::CategoryNotFound(_)
            | CatalogError::ProductNotFound(_)
            | CatalogError::FabricNotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::ValidationFailed { .. } | CatalogError::InvalidImage(_) => {
                StatusCode::BAD_REQUEST
            }
            CatalogError::Storage(_) | CatalogError::Infrastructure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for CatalogApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.0.code();

        let body = match &self.0 {
            CatalogError::Storage(msg) | CatalogError::Infrastructure(msg) => {
                log_server_error(code, msg);
                domain_error_body(code, "Internal server error")
            }
            CatalogError::ValidationFailed { field, .. } => {
                domain_error_body(code, self.0.message()).with_details(field_details(field))
            }
            CatalogError::InvalidImage(err) => {
                let body = domain_error_body(code, self.0.message());
                match image_details(err) {
                    Some(details) => body.with_details(details),
                    None => body,
                }
            }
            _ => domain_error_body(code, self.0.message()),
        };

        body.into_response_with(status)
    }
}
