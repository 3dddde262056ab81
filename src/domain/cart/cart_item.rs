//! Cart rows and their payment state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{CartItemId, ProductId, Timestamp, UserId, ValidationError};

/// Payment state of a cart row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CartStatus {
    Pending,
    Paid,
}

impl CartStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CartStatus::Pending => "pending",
            CartStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for CartStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CartStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(CartStatus::Pending),
            "paid" => Ok(CartStatus::Paid),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown cart status '{}'", other),
            )),
        }
    }
}

/// One product line in a customer's cart.
///
/// The row id is also the payment reference handed to Paystack.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub customer_id: UserId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub status: CartStatus,
    pub paid_at: Option<Timestamp>,
    /// Amount Paystack reported, in minor units.
    pub amount_paid: Option<i64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartItem {
    /// Creates a pending cart row. Quantity must be at least 1.
    pub fn new(
        customer_id: UserId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<Self, ValidationError> {
        if quantity < 1 {
            return Err(ValidationError::invalid_format(
                "quantity",
                "must be at least 1",
            ));
        }
        let now = Timestamp::now();
        Ok(Self {
            id: CartItemId::new(),
            customer_id,
            product_id,
            quantity,
            status: CartStatus::Pending,
            paid_at: None,
            amount_paid: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_paid(&self) -> bool {
        self.status == CartStatus::Paid
    }

    pub fn is_owned_by(&self, customer_id: &UserId) -> bool {
        &self.customer_id == customer_id
    }

    /// Marks the row paid. Repeating with the same values is a no-op.
    pub fn mark_paid(&mut self, paid_at: Timestamp, amount: i64) {
        self.status = CartStatus::Paid;
        self.paid_at = Some(paid_at);
        self.amount_paid = Some(amount);
        self.updated_at = Timestamp::now();
    }
}
