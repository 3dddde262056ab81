//! HandlePaystackWebhookHandler - settles cart rows from Paystack events.

use std::sync::Arc;

use crate::domain::foundation::CartItemId;
use crate::domain::payment::{PaystackWebhookVerifier, WebhookError};
use crate::ports::CartRepository;

/// Command to handle a Paystack webhook delivery.
#[derive(Debug, Clone)]
pub struct HandlePaystackWebhookCommand {
    /// Raw request body, exactly as received.
    pub payload: Vec<u8>,
    /// `x-paystack-signature` header, if sent.
    pub signature: Option<String>,
}

/// Result of webhook processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlePaystackWebhookResult {
    /// `charge.success` recorded against the cart row.
    PaymentRecorded { reference: String, amount: i64 },
    /// Verified event that needs no action.
    Ignored { event: String },
}

/// Handler for Paystack webhooks.
///
/// Redelivery of the same `charge.success` overwrites the row with the
/// same values, so Paystack retries are harmless.
pub struct HandlePaystackWebhookHandler {
    verifier: PaystackWebhookVerifier,
    cart: Arc<dyn CartRepository>,
}

impl HandlePaystackWebhookHandler {
    pub fn new(verifier: PaystackWebhookVerifier, cart: Arc<dyn CartRepository>) -> Self {
        Self { verifier, cart }
    }

    pub async fn handle(
        &self,
        cmd: HandlePaystackWebhookCommand,
    ) -> Result<HandlePaystackWebhookResult, WebhookError> {
        // 1. Signature first, then parse
        let event = self
            .verifier
            .verify_and_parse(&cmd.payload, cmd.signature.as_deref())?;

        // 2. Only charge.success changes state
        let charge = match event.charge_success()? {
            Some(charge) => charge,
            None => {
                tracing::debug!(event = %event.event, "Ignoring Paystack event");
                return Ok(HandlePaystackWebhookResult::Ignored { event: event.event });
            }
        };

        // 3. Mark the cart row paid in one transaction
        let id: CartItemId = charge
            .reference
            .parse()
            .map_err(|_| WebhookError::UnknownReference(charge.reference.clone()))?;
        let item = self
            .cart
            .mark_paid(&id, charge.paid_at, charge.amount)
            .await
            .map_err(|e| WebhookError::Database(e.to_string()))?
            .ok_or_else(|| WebhookError::UnknownReference(charge.reference.clone()))?;

        tracing::info!(
            reference = %item.id,
            amount = charge.amount,
            "Payment recorded"
        );

        Ok(HandlePaystackWebhookResult::PaymentRecorded {
            reference: charge.reference,
            amount: charge.amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCartRepository;
    use crate::domain::cart::{CartItem, CartStatus};
    use crate::domain::foundation::{ProductId, Timestamp, UserId};
    use secrecy::SecretString;
    use serde_json::json;

    fn verifier() -> PaystackWebhookVerifier {
        PaystackWebhookVerifier::new(SecretString::new("sk_test_webhook".to_string()))
    }

    fn signed(body: &serde_json::Value) -> HandlePaystackWebhookCommand {
        let payload = serde_json::to_vec(body).unwrap();
        let signature = verifier().sign(&payload).unwrap();
        HandlePaystackWebhookCommand {
            payload,
            signature: Some(signature),
        }
    }

    fn charge(reference: &str) -> serde_json::Value {
        json!({
            "event": "charge.success",
            "data": {
                "reference": reference,
                "amount": 2_500_000,
                "paid_at": "2024-05-01T10:00:00.000Z"
            }
        })
    }

    async fn setup() -> (HandlePaystackWebhookHandler, InMemoryCartRepository, CartItem) {
        let cart = InMemoryCartRepository::new();
        let item = CartItem::new(UserId::new(), ProductId::new(), 1).unwrap();
        cart.create(&item).await.unwrap();
        let handler = HandlePaystackWebhookHandler::new(verifier(), Arc::new(cart.clone()));
        (handler, cart, item)
    }

    #[tokio::test]
    async fn charge_success_marks_row_paid() {
        let (handler, cart, item) = setup().await;

        let result = handler
            .handle(signed(&charge(&item.id.to_string())))
            .await
            .unwrap();

        assert_eq!(
            result,
            HandlePaystackWebhookResult::PaymentRecorded {
                reference: item.id.to_string(),
                amount: 2_500_000,
            }
        );
        let stored = cart.find_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(stored.status, CartStatus::Paid);
        assert_eq!(stored.amount_paid, Some(2_500_000));
        assert_eq!(
            stored.paid_at,
            Timestamp::parse_rfc3339("2024-05-01T10:00:00Z")
        );
    }

    #[tokio::test]
    async fn redelivery_is_idempotent() {
        let (handler, cart, item) = setup().await;
        let cmd = signed(&charge(&item.id.to_string()));

        handler.handle(cmd.clone()).await.unwrap();
        let first = cart.find_by_id(&item.id).await.unwrap().unwrap();
        handler.handle(cmd).await.unwrap();
        let second = cart.find_by_id(&item.id).await.unwrap().unwrap();

        assert_eq!(first.status, second.status);
        assert_eq!(first.paid_at, second.paid_at);
        assert_eq!(first.amount_paid, second.amount_paid);
    }

    #[tokio::test]
    async fn bad_signature_is_rejected_before_parsing() {
        let (handler, cart, item) = setup().await;
        let mut cmd = signed(&charge(&item.id.to_string()));
        cmd.signature = Some("00".repeat(64));

        let err = handler.handle(cmd).await.unwrap_err();

        assert!(matches!(err, WebhookError::InvalidSignature));
        let stored = cart.find_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(stored.status, CartStatus::Pending);
    }

    #[tokio::test]
    async fn missing_signature_is_rejected() {
        let (handler, _, item) = setup().await;
        let mut cmd = signed(&charge(&item.id.to_string()));
        cmd.signature = None;

        let err = handler.handle(cmd).await.unwrap_err();

        assert!(matches!(err, WebhookError::MissingSignature));
    }

    #[tokio::test]
    async fn unknown_reference_is_not_found() {
        let (handler, _, _) = setup().await;
        let reference = CartItemId::new().to_string();

        let err = handler.handle(signed(&charge(&reference))).await.unwrap_err();

        assert!(matches!(err, WebhookError::UnknownReference(r) if r == reference));
    }

    #[tokio::test]
    async fn other_events_are_ignored() {
        let (handler, cart, item) = setup().await;

        let result = handler
            .handle(signed(&json!({ "event": "transfer.success", "data": {} })))
            .await
            .unwrap();

        assert_eq!(
            result,
            HandlePaystackWebhookResult::Ignored {
                event: "transfer.success".to_string()
            }
        );
        let stored = cart.find_by_id(&item.id).await.unwrap().unwrap();
        assert!(!stored.is_paid());
    }

    #[tokio::test]
    async fn malformed_json_is_parse_error() {
        let (handler, _, _) = setup().await;
        let payload = b"{not json".to_vec();
        let signature = verifier().sign(&payload).unwrap();

        let err = handler
            .handle(HandlePaystackWebhookCommand {
                payload,
                signature: Some(signature),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, WebhookError::ParseError(_)));
    }
}
