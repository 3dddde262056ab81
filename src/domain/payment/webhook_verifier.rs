//! Paystack webhook signature verification.
//!
//! Paystack signs the raw request body with HMAC-SHA512 keyed by the
//! account's secret key and sends the lowercase hex digest in the
//! `x-paystack-signature` header.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha512;
use subtle::ConstantTimeEq;

use super::paystack_event::PaystackEvent;
use super::webhook_errors::WebhookError;

/// Header Paystack puts the body signature in.
pub const SIGNATURE_HEADER: &str = "x-paystack-signature";

type HmacSha512 = Hmac<Sha512>;

/// Verifier for Paystack webhook signatures.
#[derive(Clone)]
pub struct PaystackWebhookVerifier {
    secret: SecretString,
}

impl PaystackWebhookVerifier {
    /// Creates a new verifier keyed by the Paystack secret key.
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Checks `signature` against the HMAC-SHA512 of `payload`.
    ///
    /// A missing header fails with `MissingSignature`. A header that is not
    /// hex, or whose digest differs, fails with `InvalidSignature`.
    pub fn verify(&self, payload: &[u8], signature: Option<&str>) -> Result<(), WebhookError> {
        let signature = signature
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(WebhookError::MissingSignature)?;

        let supplied = hex::decode(signature).map_err(|_| WebhookError::InvalidSignature)?;
        let expected = self.compute_signature(payload)?;

        if !constant_time_compare(&expected, &supplied) {
            return Err(WebhookError::InvalidSignature);
        }

        Ok(())
    }

    /// Verifies the signature, then parses the body as a Paystack event.
    ///
    /// The body is never parsed before the signature check passes.
    pub fn verify_and_parse(
        &self,
        payload: &[u8],
        signature: Option<&str>,
    ) -> Result<PaystackEvent, WebhookError> {
        self.verify(payload, signature)?;
        PaystackEvent::from_slice(payload)
    }

    /// Returns the hex signature Paystack would send for `payload`.
    pub fn sign(&self, payload: &[u8]) -> Result<String, WebhookError> {
        Ok(hex::encode(self.compute_signature(payload)?))
    }

    fn compute_signature(&self, payload: &[u8]) -> Result<Vec<u8>, WebhookError> {
        let mut mac = HmacSha512::new_from_slice(self.secret.expose_secret().as_bytes())
            .map_err(|_| WebhookError::InvalidSignature)?;
        mac.update(payload);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

impl std::fmt::Debug for PaystackWebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaystackWebhookVerifier")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Performs constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
