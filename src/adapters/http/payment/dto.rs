//! HTTP DTOs for payment endpoints.

use serde::{Deserialize, Serialize};

use crate::ports::TransactionAuthorization;

/// Request to start a Paystack checkout for a cart row.
#[derive(Debug, Clone, Deserialize)]
pub struct InitializeTransactionRequest {
    pub email: String,
    /// Amount in minor units (kobo).
    pub amount: i64,
    /// Cart item id.
    pub reference: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InitializeTransactionResponse {
    pub authorization_url: String,
    pub access_code: String,
    pub reference: String,
}

impl From<TransactionAuthorization> for InitializeTransactionResponse {
    fn from(auth: TransactionAuthorization) -> Self {
        Self {
            authorization_url: auth.authorization_url,
            access_code: auth.access_code,
            reference: auth.reference,
        }
    }
}

/// Acknowledgement returned to Paystack.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookAck {
    pub received: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_requires_integer_amount() {
        let ok: Result<InitializeTransactionRequest, _> = serde_json::from_value(json!({
            "email": "ada@example.com",
            "amount": 2500000,
            "reference": "abc"
        }));
        assert!(ok.is_ok());

        let fractional: Result<InitializeTransactionRequest, _> = serde_json::from_value(json!({
            "email": "ada@example.com",
            "amount": 25.5,
            "reference": "abc"
        }));
        assert!(fractional.is_err());
    }
}
