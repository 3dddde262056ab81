//! Cart repository port.

use crate::domain::cart::CartItem;
use crate::domain::foundation::{CartItemId, DomainError, ProductId, Timestamp, UserId};
use async_trait::async_trait;

#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn create(&self, item: &CartItem) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &CartItemId) -> Result<Option<CartItem>, DomainError>;

    /// A customer's cart rows, oldest first.
    async fn list_by_customer(&self, customer_id: &UserId) -> Result<Vec<CartItem>, DomainError>;

    /// True if any cart row, pending or paid, points at the product.
    async fn references_product(&self, product_id: &ProductId) -> Result<bool, DomainError>;

    /// # Errors
    ///
    /// - `CartItemNotFound` if no such row
    async fn delete(&self, id: &CartItemId) -> Result<(), DomainError>;

    /// Marks a row paid with the provider's timestamp and amount.
    ///
    /// Runs as one transaction: the row is locked, updated and committed,
    /// or nothing changes. Returns `None` if the row does not exist.
    /// Marking an already-paid row again overwrites it with the new values.
    async fn mark_paid(
        &self,
        id: &CartItemId,
        paid_at: Timestamp,
        amount: i64,
    ) -> Result<Option<CartItem>, DomainError>;
}
