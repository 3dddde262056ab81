//! HTTP handlers for payment endpoints.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::adapters::http::error::{
    domain_error_body, field_details, log_server_error, ErrorResponse,
};
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::payment::{
    HandlePaystackWebhookCommand, HandlePaystackWebhookHandler, HandlePaystackWebhookResult,
    InitializeTransactionCommand, InitializeTransactionHandler,
};
use crate::domain::payment::{
    PaymentError, PaystackWebhookVerifier, WebhookError, SIGNATURE_HEADER,
};
use crate::ports::{CartRepository, PaymentProvider};

use super::dto::{InitializeTransactionRequest, InitializeTransactionResponse, WebhookAck};

/// Dependencies for the payment routes.
#[derive(Clone)]
pub struct PaymentAppState {
    pub cart: Arc<dyn CartRepository>,
    pub provider: Arc<dyn PaymentProvider>,
    pub verifier: PaystackWebhookVerifier,
}

impl PaymentAppState {
    pub fn initialize_handler(&self) -> InitializeTransactionHandler {
        InitializeTransactionHandler::new(self.cart.clone(), self.provider.clone())
    }

    pub fn webhook_handler(&self) -> HandlePaystackWebhookHandler {
        HandlePaystackWebhookHandler::new(self.verifier.clone(), self.cart.clone())
    }
}

/// POST /payment/initialize-transactions
pub async fn initialize_transaction(
    State(state): State<PaymentAppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<InitializeTransactionRequest>,
) -> Result<impl IntoResponse, PaymentApiError> {
    let authorization = state
        .initialize_handler()
        .handle(InitializeTransactionCommand {
            customer_id: user.id,
            email: request.email,
            amount: request.amount,
            reference: request.reference,
        })
        .await?;

    Ok(Json(InitializeTransactionResponse::from(authorization)))
}

/// POST /payment/webhook
///
/// Unauthenticated; the HMAC signature over the raw body is the credential.
pub async fn paystack_webhook(
    State(state): State<PaymentAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, WebhookApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let result = state
        .webhook_handler()
        .handle(HandlePaystackWebhookCommand {
            payload: body.to_vec(),
            signature,
        })
        .await?;

    if let HandlePaystackWebhookResult::PaymentRecorded { reference, .. } = &result {
        tracing::debug!(reference = %reference, "Webhook acknowledged");
    }

    Ok(Json(WebhookAck { received: true }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts payment errors to HTTP responses.
#[derive(Debug)]
pub struct PaymentApiError(PaymentError);

impl From<PaymentError> for PaymentApiError {
    fn from(err: PaymentError) -> Self {
        Self(err)
    }
}

impl PaymentApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            PaymentError::ReferenceNotFound(_) => StatusCode::NOT_FOUND,
            PaymentError::AlreadyPaid(_) => StatusCode::CONFLICT,
            PaymentError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            PaymentError::Provider(_) | PaymentError::Infrastructure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for PaymentApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.0.code();

        let body = match &self.0 {
            PaymentError::Infrastructure(msg) => {
                log_server_error(code, msg);
                domain_error_body(code, "Internal server error")
            }
            PaymentError::ValidationFailed { field, .. } => {
                domain_error_body(code, self.0.message()).with_details(field_details(field))
            }
            _ => domain_error_body(code, self.0.message()),
        };

        body.into_response_with(status)
    }
}

/// Webhook failures; Paystack retries anything that is not a 2xx.
#[derive(Debug)]
pub struct WebhookApiError(WebhookError);

impl From<WebhookError> for WebhookApiError {
    fn from(err: WebhookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        let message = match &self.0 {
            WebhookError::Database(msg) => {
                tracing::error!(error = %msg, retryable = self.0.is_retryable(), "Webhook failed");
                "Internal server error".to_string()
            }
            other => {
                tracing::warn!(error = %other, "Webhook rejected");
                other.to_string()
            }
        };

        ErrorResponse::new(self.0.code(), message).into_response_with(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_not_found_is_404() {
        let err = PaymentApiError::from(PaymentError::reference_not_found("abc"));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn already_paid_is_conflict() {
        let err = PaymentApiError::from(PaymentError::already_paid("abc"));
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn provider_failure_is_server_error() {
        let err = PaymentApiError::from(PaymentError::provider("timeout"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_signature_is_bad_request() {
        let response = WebhookApiError::from(WebhookError::InvalidSignature).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
