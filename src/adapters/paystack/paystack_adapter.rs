//! Paystack payment provider adapter.
//!
//! Implements the `PaymentProvider` port against the Paystack REST API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = PaystackConfig::new(secret_key).with_callback_url(url);
//! let adapter = PaystackPaymentAdapter::new(config);
//! ```

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::ports::{
    InitializeTransactionRequest, PaymentProvider, PaymentProviderError, TransactionAuthorization,
};

/// Default Paystack API host.
pub const DEFAULT_PAYSTACK_BASE_URL: &str = "https://api.paystack.co";

/// Paystack API configuration.
#[derive(Clone)]
pub struct PaystackConfig {
    /// Secret key (sk_live_... or sk_test_...). Also keys webhook signatures.
    secret_key: SecretString,

    /// Base URL for the Paystack API.
    base_url: String,

    /// Redirect target after checkout, sent with every initialization.
    callback_url: Option<String>,

    /// Per-request timeout.
    timeout: Duration,
}

impl PaystackConfig {
    /// Create a new Paystack configuration.
    pub fn new(secret_key: SecretString) -> Self {
        Self {
            secret_key,
            base_url: DEFAULT_PAYSTACK_BASE_URL.to_string(),
            callback_url: None,
            timeout: Duration::from_secs(15),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_callback_url(mut self, url: Option<String>) -> Self {
        self.callback_url = url;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn secret_key(&self) -> &SecretString {
        &self.secret_key
    }
}

impl std::fmt::Debug for PaystackConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaystackConfig")
            .field("secret_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("callback_url", &self.callback_url)
            .finish()
    }
}

/// Envelope every Paystack response uses.
#[derive(Debug, Deserialize)]
struct PaystackResponse<T> {
    status: bool,
    #[serde(default)]
    message: String,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct InitializeData {
    authorization_url: String,
    access_code: String,
    reference: String,
}

/// Paystack payment provider adapter.
pub struct PaystackPaymentAdapter {
    config: PaystackConfig,
    http_client: reqwest::Client,
}

impl PaystackPaymentAdapter {
    /// Create a new Paystack adapter with the given configuration.
    pub fn new(config: PaystackConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to default HTTP client");
                reqwest::Client::new()
            });
        Self {
            config,
            http_client,
        }
    }
}

#[async_trait]
impl PaymentProvider for PaystackPaymentAdapter {
    async fn initialize_transaction(
        &self,
        mut request: InitializeTransactionRequest,
    ) -> Result<TransactionAuthorization, PaymentProviderError> {
        let url = format!("{}/transaction/initialize", self.config.base_url);
        if request.callback_url.is_none() {
            request.callback_url = self.config.callback_url.clone();
        }

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.config.secret_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| PaymentProviderError::network(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::error!(
                status = %status,
                reference = %request.reference,
                error = %e,
                "Failed to read Paystack response body"
            );
            PaymentProviderError::network(format!("Failed to read response body: {}", e))
        })?;

        if !status.is_success() {
            let message = serde_json::from_str::<PaystackResponse<serde_json::Value>>(&body)
                .map(|r| r.message)
                .unwrap_or(body);
            tracing::error!(
                status = %status,
                reference = %request.reference,
                error = %message,
                "Paystack initialize_transaction failed"
            );
            return Err(if status == reqwest::StatusCode::UNAUTHORIZED {
                PaymentProviderError::authentication(message)
            } else if status.is_client_error() {
                PaymentProviderError::invalid_request(message)
            } else {
                PaymentProviderError::provider(message)
            });
        }

        let parsed: PaystackResponse<InitializeData> = serde_json::from_str(&body).map_err(|e| {
            PaymentProviderError::provider(format!("Failed to parse Paystack response: {}", e))
        })?;

        match parsed.data {
            Some(data) if parsed.status => {
                tracing::info!(reference = %data.reference, "Paystack transaction initialized");
                Ok(TransactionAuthorization {
                    authorization_url: data.authorization_url,
                    access_code: data.access_code,
                    reference: data.reference,
                })
            }
            _ => Err(PaymentProviderError::provider(parsed.message)),
        }
    }
}
