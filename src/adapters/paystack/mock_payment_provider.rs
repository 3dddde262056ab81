//! Mock payment provider for testing.
//!
//! Returns a deterministic checkout URL per reference, records every call,
//! and can be told to fail the next call.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::ports::{
    InitializeTransactionRequest, PaymentProvider, PaymentProviderError, TransactionAuthorization,
};

/// Mock payment provider for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentProvider::new();
/// mock.fail_next(PaymentProviderError::authentication("Invalid key")).await;
/// let result = mock.initialize_transaction(request).await;
/// ```
#[derive(Default, Clone)]
pub struct MockPaymentProvider {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Error to return on next call.
    next_error: Option<PaymentProviderError>,

    /// Every request received, in order.
    calls: Vec<InitializeTransactionRequest>,
}

impl MockPaymentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next call fail with `error`.
    pub async fn fail_next(&self, error: PaymentProviderError) {
        self.inner.lock().await.next_error = Some(error);
    }

    /// Requests received so far.
    pub async fn calls(&self) -> Vec<InitializeTransactionRequest> {
        self.inner.lock().await.calls.clone()
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn initialize_transaction(
        &self,
        request: InitializeTransactionRequest,
    ) -> Result<TransactionAuthorization, PaymentProviderError> {
        let mut state = self.inner.lock().await;
        state.calls.push(request.clone());

        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        let access_code = format!("ac_{}", request.reference.replace('-', ""));
        Ok(TransactionAuthorization {
            authorization_url: format!("https://checkout.paystack.test/{}", access_code),
            access_code,
            reference: request.reference,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> InitializeTransactionRequest {
        InitializeTransactionRequest {
            email: "ada@example.com".to_string(),
            amount: 5000,
            reference: "abc-123".to_string(),
            callback_url: None,
        }
    }

    #[tokio::test]
    async fn returns_authorization_for_reference() {
        let mock = MockPaymentProvider::new();
        let auth = mock.initialize_transaction(request()).await.unwrap();

        assert_eq!(auth.reference, "abc-123");
        assert!(auth.authorization_url.ends_with(&auth.access_code));
        assert_eq!(mock.calls().await.len(), 1);
    }

    #[tokio::test]
    async fn fail_next_applies_once() {
        let mock = MockPaymentProvider::new();
        mock.fail_next(PaymentProviderError::network("down")).await;

        assert!(mock.initialize_transaction(request()).await.is_err());
        assert!(mock.initialize_transaction(request()).await.is_ok());
    }
}
