//! Payment configuration (Paystack)

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Paystack settings. The secret key also keys webhook signatures.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// `sk_test_...` or `sk_live_...`
    pub paystack_secret_key: SecretString,

    #[serde(default = "default_base_url")]
    pub paystack_base_url: String,

    /// Where Paystack sends the customer after checkout
    #[serde(default)]
    pub callback_url: Option<String>,
}

impl PaymentConfig {
    pub fn is_test_mode(&self) -> bool {
        self.paystack_secret_key.expose_secret().starts_with("sk_test_")
    }

    pub fn is_live_mode(&self) -> bool {
        self.paystack_secret_key.expose_secret().starts_with("sk_live_")
    }

    pub fn validate(&self, environment: Environment) -> Result<(), ValidationError> {
        let key = self.paystack_secret_key.expose_secret();
        if key.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__PAYSTACK_SECRET_KEY"));
        }
        if !key.starts_with("sk_") {
            return Err(ValidationError::InvalidPaystackKey);
        }

        check_url("paystack_base_url", &self.paystack_base_url, environment)?;
        if let Some(callback) = &self.callback_url {
            check_url("callback_url", callback, environment)?;
        }
        Ok(())
    }
}

/// Requires http(s), and https in production.
pub(super) fn check_url(
    name: &'static str,
    url: &str,
    environment: Environment,
) -> Result<(), ValidationError> {
    if !url.starts_with("https://") && !url.starts_with("http://") {
        return Err(ValidationError::InvalidUrl(name));
    }
    if environment == Environment::Production && !url.starts_with("https://") {
        return Err(ValidationError::UrlMustBeHttps(name));
    }
    Ok(())
}

fn default_base_url() -> String {
    "https://api.paystack.co".to_string()
}
