//! InitializeTransactionHandler - starts a Paystack checkout for a cart row.

use std::sync::Arc;

use crate::domain::customer::normalize_email;
use crate::domain::foundation::{CartItemId, UserId};
use crate::domain::payment::PaymentError;
use crate::ports::{
    CartRepository, InitializeTransactionRequest, PaymentProvider, TransactionAuthorization,
};

/// Command to initialize a payment.
#[derive(Debug, Clone)]
pub struct InitializeTransactionCommand {
    /// The caller; must own the cart row.
    pub customer_id: UserId,
    pub email: String,
    /// Amount in minor units (kobo).
    pub amount: i64,
    /// Cart row id.
    pub reference: String,
}

pub struct InitializeTransactionHandler {
    cart: Arc<dyn CartRepository>,
    provider: Arc<dyn PaymentProvider>,
}

impl InitializeTransactionHandler {
    pub fn new(cart: Arc<dyn CartRepository>, provider: Arc<dyn PaymentProvider>) -> Self {
        Self { cart, provider }
    }

    pub async fn handle(
        &self,
        cmd: InitializeTransactionCommand,
    ) -> Result<TransactionAuthorization, PaymentError> {
        // 1. Request shape
        if cmd.amount <= 0 {
            return Err(PaymentError::validation("amount", "must be greater than zero"));
        }
        let email = normalize_email(&cmd.email)
            .map_err(|_| PaymentError::validation("email", "not a valid email address"))?;

        // 2. Reference must be a pending cart row owned by the caller
        let reference = cmd.reference.trim().to_string();
        let id: CartItemId = reference
            .parse()
            .map_err(|_| PaymentError::reference_not_found(&reference))?;
        let item = self
            .cart
            .find_by_id(&id)
            .await?
            .filter(|item| item.is_owned_by(&cmd.customer_id))
            .ok_or_else(|| PaymentError::reference_not_found(&reference))?;
        if item.is_paid() {
            return Err(PaymentError::already_paid(&reference));
        }

        // 3. Hand off to the provider
        let authorization = self
            .provider
            .initialize_transaction(InitializeTransactionRequest {
                email,
                amount: cmd.amount,
                reference: item.id.to_string(),
                callback_url: None,
            })
            .await
            .map_err(|e| {
                tracing::error!(reference = %item.id, error = %e, "Paystack initialize failed");
                PaymentError::provider(e.to_string())
            })?;

        tracing::info!(reference = %item.id, amount = cmd.amount, "Transaction initialized");
        Ok(authorization)
    }
}
