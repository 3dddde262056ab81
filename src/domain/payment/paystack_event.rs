//! Paystack webhook event payloads.
//!
//! Paystack posts `{ "event": "...", "data": { ... } }`. Only
//! `charge.success` changes state here; the `data` shape of other events is
//! left unparsed.

use serde::{Deserialize, Serialize};

use super::webhook_errors::WebhookError;
use crate::domain::foundation::Timestamp;

/// Event name for a completed charge.
pub const CHARGE_SUCCESS: &str = "charge.success";

/// A Paystack webhook envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaystackEvent {
    /// Event type, e.g. `charge.success`.
    pub event: String,

    /// Event payload; shape depends on `event`.
    #[serde(default)]
    pub data: serde_json::Value,
}

/// The parts of a `charge.success` payload used to settle a cart row.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeSuccess {
    /// Our payment reference (the cart row id as a string).
    pub reference: String,

    /// When Paystack settled the charge.
    pub paid_at: Timestamp,

    /// Amount in minor currency units (kobo).
    pub amount: i64,
}

#[derive(Deserialize)]
struct RawChargeData {
    reference: Option<String>,
    paid_at: Option<String>,
    amount: Option<i64>,
}

impl PaystackEvent {
    /// Parses a raw webhook body.
    pub fn from_slice(payload: &[u8]) -> Result<Self, WebhookError> {
        serde_json::from_slice(payload).map_err(|e| WebhookError::ParseError(e.to_string()))
    }

    /// Returns true if this is a `charge.success` event.
    pub fn is_charge_success(&self) -> bool {
        self.event == CHARGE_SUCCESS
    }

    /// Extracts the charge details, or `None` for any other event type.
    pub fn charge_success(&self) -> Result<Option<ChargeSuccess>, WebhookError> {
        if !self.is_charge_success() {
            return Ok(None);
        }

        let raw: RawChargeData = serde_json::from_value(self.data.clone())
            .map_err(|e| WebhookError::ParseError(e.to_string()))?;

        let reference = raw
            .reference
            .filter(|r| !r.trim().is_empty())
            .ok_or(WebhookError::MissingField("data.reference"))?;
        let amount = raw.amount.ok_or(WebhookError::MissingField("data.amount"))?;
        let paid_at = raw
            .paid_at
            .ok_or(WebhookError::MissingField("data.paid_at"))?;
        let paid_at = Timestamp::parse_rfc3339(&paid_at)
            .ok_or_else(|| WebhookError::ParseError(format!("invalid paid_at: {}", paid_at)))?;

        Ok(Some(ChargeSuccess {
            reference,
            paid_at,
            amount,
        }))
    }
}
