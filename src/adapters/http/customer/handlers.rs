//! HTTP handlers for customer endpoints.
//!
//! These handlers connect axum routes to the customer command/query handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::adapters::http::error::{
    domain_error_body, field_details, image_details, log_server_error,
};
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::customer::{
    AddToCartCommand, AddToCartHandler, GetMeasurementHandler, GetMeasurementQuery,
    GetProfileHandler, GetProfileQuery, ListCartHandler, ListCartQuery, LoginCommand,
    LoginHandler, RegisterCustomerCommand, RegisterCustomerHandler, RemoveCartItemCommand,
    RemoveCartItemHandler, UpdateProfileCommand, UpdateProfileHandler,
    UploadMeasurementImagesCommand, UploadMeasurementImagesHandler, UpsertMeasurementCommand,
    UpsertMeasurementHandler,
};
use crate::domain::customer::{BodyMeasurements, CustomerError};
use crate::domain::foundation::{CartItemId, ProductId};
use crate::ports::{
    CartRepository, CustomerRepository, MeasurementRepository, ObjectStorage, PasswordHasher,
    ProductRepository, TokenIssuer,
};

use super::dto::{
    AddToCartRequest, CartItemResponse, CustomerResponse, ImagesRequest, LoginRequest,
    MeasurementResponse, RegisterRequest, RegisterResponse, TokenResponse, UpdateProfileRequest,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Dependencies for the customer routes.
#[derive(Clone)]
pub struct CustomerAppState {
    pub customers: Arc<dyn CustomerRepository>,
    pub measurements: Arc<dyn MeasurementRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub cart: Arc<dyn CartRepository>,
    pub storage: Arc<dyn ObjectStorage>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn TokenIssuer>,
}

impl CustomerAppState {
    pub fn register_handler(&self) -> RegisterCustomerHandler {
        RegisterCustomerHandler::new(self.customers.clone(), self.hasher.clone())
    }

    pub fn login_handler(&self) -> LoginHandler {
        LoginHandler::new(
            self.customers.clone(),
            self.hasher.clone(),
            self.tokens.clone(),
        )
    }

    pub fn get_profile_handler(&self) -> GetProfileHandler {
        GetProfileHandler::new(self.customers.clone())
    }

    pub fn update_profile_handler(&self) -> UpdateProfileHandler {
        UpdateProfileHandler::new(self.customers.clone(), self.storage.clone())
    }

    pub fn get_measurement_handler(&self) -> GetMeasurementHandler {
        GetMeasurementHandler::new(self.measurements.clone())
    }

    pub fn upsert_measurement_handler(&self) -> UpsertMeasurementHandler {
        UpsertMeasurementHandler::new(self.measurements.clone())
    }

    pub fn upload_measurement_images_handler(&self) -> UploadMeasurementImagesHandler {
        UploadMeasurementImagesHandler::new(self.measurements.clone(), self.storage.clone())
    }

    pub fn add_to_cart_handler(&self) -> AddToCartHandler {
        AddToCartHandler::new(self.cart.clone(), self.products.clone())
    }

    pub fn list_cart_handler(&self) -> ListCartHandler {
        ListCartHandler::new(self.cart.clone())
    }

    pub fn remove_cart_item_handler(&self) -> RemoveCartItemHandler {
        RemoveCartItemHandler::new(self.cart.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Account
// ════════════════════════════════════════════════════════════════════════════════

/// POST /customer/register
pub async fn register(
    State(state): State<CustomerAppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, CustomerApiError> {
    let cmd = RegisterCustomerCommand {
        first_name: request.first_name,
        last_name: request.last_name,
        email: request.email,
        phone: request.phone,
        password1: request.password1,
        password2: request.password2,
    };

    let customer = state.register_handler().handle(cmd).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            email: customer.email,
        }),
    ))
}

/// POST /customer/login
pub async fn login(
    State(state): State<CustomerAppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, CustomerApiError> {
    let result = state
        .login_handler()
        .handle(LoginCommand {
            email: request.email,
            password: request.password,
        })
        .await?;

    Ok(Json(TokenResponse::bearer(
        result.token.access_token,
        result.token.expires_in,
    )))
}

/// GET /customer/me
pub async fn get_profile(
    State(state): State<CustomerAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, CustomerApiError> {
    let customer = state
        .get_profile_handler()
        .handle(GetProfileQuery {
            customer_id: user.id,
        })
        .await?;

    Ok(Json(CustomerResponse::from(customer)))
}

/// PUT /customer/me
pub async fn update_profile(
    State(state): State<CustomerAppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, CustomerApiError> {
    let (update, image) = request.into_parts();
    let customer = state
        .update_profile_handler()
        .handle(UpdateProfileCommand {
            customer_id: user.id,
            update,
            image,
        })
        .await?;

    Ok(Json(CustomerResponse::from(customer)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Measurements
// ════════════════════════════════════════════════════════════════════════════════

/// GET /customer/measurement
pub async fn get_measurement(
    State(state): State<CustomerAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, CustomerApiError> {
    let measurement = state
        .get_measurement_handler()
        .handle(GetMeasurementQuery {
            customer_id: user.id,
        })
        .await?;

    Ok(Json(MeasurementResponse::from(measurement)))
}

/// PUT /customer/measurement
pub async fn upsert_measurement(
    State(state): State<CustomerAppState>,
    RequireAuth(user): RequireAuth,
    Json(values): Json<BodyMeasurements>,
) -> Result<impl IntoResponse, CustomerApiError> {
    let measurement = state
        .upsert_measurement_handler()
        .handle(UpsertMeasurementCommand {
            customer_id: user.id,
            values,
        })
        .await?;

    Ok(Json(MeasurementResponse::from(measurement)))
}

/// POST /customer/measurement/images
pub async fn upload_measurement_images(
    State(state): State<CustomerAppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<ImagesRequest>,
) -> Result<impl IntoResponse, CustomerApiError> {
    let measurement = state
        .upload_measurement_images_handler()
        .handle(UploadMeasurementImagesCommand {
            customer_id: user.id,
            images: request.images,
        })
        .await?;

    Ok(Json(MeasurementResponse::from(measurement)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Cart
// ════════════════════════════════════════════════════════════════════════════════

/// POST /customer/cart
pub async fn add_to_cart(
    State(state): State<CustomerAppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<AddToCartRequest>,
) -> Result<impl IntoResponse, CustomerApiError> {
    let product_id: ProductId = request
        .product_id
        .trim()
        .parse()
        .map_err(|_| CustomerError::validation("product_id", "not a valid product id"))?;

    let item = state
        .add_to_cart_handler()
        .handle(AddToCartCommand {
            customer_id: user.id,
            product_id,
            quantity: request.quantity,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(CartItemResponse::from(item))))
}

/// GET /customer/cart
pub async fn list_cart(
    State(state): State<CustomerAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, CustomerApiError> {
    let items = state
        .list_cart_handler()
        .handle(ListCartQuery {
            customer_id: user.id,
        })
        .await?;

    let response: Vec<CartItemResponse> = items.into_iter().map(CartItemResponse::from).collect();
    Ok(Json(response))
}

/// DELETE /customer/cart/{id}
pub async fn remove_cart_item(
    State(state): State<CustomerAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, CustomerApiError> {
    let cart_item_id: CartItemId = id
        .parse()
        .map_err(|_| CustomerError::validation("id", "not a valid cart item id"))?;

    state
        .remove_cart_item_handler()
        .handle(RemoveCartItemCommand {
            customer_id: user.id,
            cart_item_id,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts customer errors to HTTP responses.
#[derive(Debug)]
pub struct CustomerApiError(CustomerError);

impl From<CustomerError> for CustomerApiError {
    fn from(err: CustomerError) -> Self {
        Self(err)
    }
}

impl CustomerApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            CustomerError::PhoneExists(_)
            | CustomerError::EmailExists(_)
            | CustomerError::CartItemAlreadyPaid(_) => StatusCode::CONFLICT,
            CustomerError::PasswordMismatch
            | CustomerError::WeakPassword
            | CustomerError::ValidationFailed { .. }
            | CustomerError::InvalidImage(_) => StatusCode::BAD_REQUEST,
            CustomerError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            CustomerError::CustomerNotFound(_)
            | CustomerError::MeasurementNotFound(_)
            | CustomerError::ProductNotFound(_)
            | CustomerError::CartItemNotFound(_) => StatusCode::NOT_FOUND,
            CustomerError::Storage(_) | CustomerError::Infrastructure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for CustomerApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.0.code();

        let body = match &self.0 {
            CustomerError::Storage(msg) | CustomerError::Infrastructure(msg) => {
                log_server_error(code, msg);
                domain_error_body(code, "Internal server error")
            }
            CustomerError::ValidationFailed { field, .. } => {
                domain_error_body(code, self.0.message()).with_details(field_details(field))
            }
            CustomerError::InvalidImage(err) => {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::domain::media::ImageError;

    fn status_of(err: CustomerError) -> StatusCode {
        CustomerApiError::from(err).status()
    }

    #[test]
    fn duplicates_are_conflicts() {
        assert_eq!(
            status_of(CustomerError::PhoneExists("0801".to_string())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(CustomerError::EmailExists("a@b.co".to_string())),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn password_problems_are_bad_requests() {
        assert_eq!(status_of(CustomerError::PasswordMismatch), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(CustomerError::WeakPassword), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn bad_credentials_are_unauthorized() {
        assert_eq!(status_of(CustomerError::InvalidCredentials), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn missing_rows_are_not_found() {
        assert_eq!(
            status_of(CustomerError::MeasurementNotFound(UserId::new())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(CustomerError::CartItemNotFound(CartItemId::new())),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn paid_cart_item_is_conflict() {
        assert_eq!(
            status_of(CustomerError::CartItemAlreadyPaid(CartItemId::new())),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn storage_failure_is_server_error() {
        assert_eq!(
            status_of(CustomerError::Storage("bucket gone".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn invalid_image_is_bad_request() {
        let err = CustomerError::InvalidImage(ImageError::NotBase64 { index: 1 });
        let response = CustomerApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
