//! HTTP DTOs for customer endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::cart::{CartItem, CartStatus};
use crate::domain::customer::{BodyMeasurements, Customer, Gender, Measurement, ProfileUpdate};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Sign-up form. Both password fields must match.
#[derive(Clone, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password1: String,
    pub password2: String,
}

#[derive(Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Partial profile update. `image` is a base64 payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl UpdateProfileRequest {
    pub fn into_parts(self) -> (ProfileUpdate, Option<String>) {
        let update = ProfileUpdate {
            first_name: self.first_name,
            last_name: self.last_name,
            date_of_birth: self.date_of_birth,
            gender: self.gender,
            address: self.address,
        };
        (update, self.image)
    }
}

/// Batch of base64 images.
#[derive(Debug, Clone, Deserialize)]
pub struct ImagesRequest {
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub email: String,
}

/// OAuth2-style bearer token response.
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Lifetime in seconds.
    pub expires_in: i64,
}

impl TokenResponse {
    pub fn bearer(access_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            token_type: "bearer",
            expires_in,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub address: Option<String>,
    pub image_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id.to_string(),
            first_name: customer.first_name,
            last_name: customer.last_name,
            email: customer.email,
            phone: customer.phone,
            date_of_birth: customer.date_of_birth,
            gender: customer.gender,
            address: customer.address,
            image_url: customer.image_url,
            created_at: customer.created_at.as_datetime().to_rfc3339(),
            updated_at: customer.updated_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Measurement row; body values are flattened to top-level fields.
#[derive(Debug, Clone, Serialize)]
pub struct MeasurementResponse {
    pub customer_id: String,
    #[serde(flatten)]
    pub values: BodyMeasurements,
    pub images: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Measurement> for MeasurementResponse {
    fn from(m: Measurement) -> Self {
        Self {
            customer_id: m.customer_id.to_string(),
            values: m.values,
            images: m.images,
            created_at: m.created_at.as_datetime().to_rfc3339(),
            updated_at: m.updated_at.as_datetime().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CartItemResponse {
    pub id: String,
    pub product_id: String,
    pub quantity: i32,
    pub status: CartStatus,
    pub paid_at: Option<String>,
    /// Minor units, set once paid.
    pub amount_paid: Option<i64>,
    pub created_at: String,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        Self {
            id: item.id.to_string(),
            product_id: item.product_id.to_string(),
            quantity: item.quantity,
            status: item.status,
            paid_at: item.paid_at.map(|t| t.as_datetime().to_rfc3339()),
            amount_paid: item.amount_paid,
            created_at: item.created_at.as_datetime().to_rfc3339(),
        }
    }
}
