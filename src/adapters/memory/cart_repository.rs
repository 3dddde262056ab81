//! In-memory cart repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::cart::CartItem;
use crate::domain::foundation::{
    CartItemId, DomainError, ErrorCode, ProductId, Timestamp, UserId,
};
use crate::ports::CartRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryCartRepository {
    items: Arc<RwLock<HashMap<CartItemId, CartItem>>>,
}

impl InMemoryCartRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored cart rows
    pub async fn item_count(&self) -> usize {
        self.items.read().await.len()
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn create(&self, item: &CartItem) -> Result<(), DomainError> {
        self.items.write().await.insert(item.id, item.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &CartItemId) -> Result<Option<CartItem>, DomainError> {
        Ok(self.items.read().await.get(id).cloned())
    }

    async fn list_by_customer(&self, customer_id: &UserId) -> Result<Vec<CartItem>, DomainError> {
        let mut items: Vec<CartItem> = self
            .items
            .read()
            .await
            .values()
            .filter(|i| i.is_owned_by(customer_id))
            .cloned()
            .collect();
        items.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(items)
    }

    async fn references_product(&self, product_id: &ProductId) -> Result<bool, DomainError> {
        Ok(self
            .items
            .read()
            .await
            .values()
            .any(|i| &i.product_id == product_id))
    }

    async fn delete(&self, id: &CartItemId) -> Result<(), DomainError> {
        match self.items.write().await.remove(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::new(
                ErrorCode::CartItemNotFound,
                format!("Cart item not found: {}", id),
            )),
        }
    }

    async fn mark_paid(
        &self,
        id: &CartItemId,
        paid_at: Timestamp,
        amount: i64,
    ) -> Result<Option<CartItem>, DomainError> {
        let mut items = self.items.write().await;
        Ok(items.get_mut(id).map(|item| {
            item.mark_paid(paid_at, amount);
            item.clone()
        }))
    }
}
