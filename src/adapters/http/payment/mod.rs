//! HTTP adapter for payment endpoints under `/payment`.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{PaymentApiError, PaymentAppState, WebhookApiError};
pub use routes::payment_router;
