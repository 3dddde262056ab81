//! Cart handlers: add, list and remove.

use std::sync::Arc;

use crate::domain::cart::CartItem;
use crate::domain::customer::CustomerError;
use crate::domain::foundation::{CartItemId, ProductId, UserId};
use crate::ports::{CartRepository, ProductRepository};

#[derive(Debug, Clone)]
pub struct AddToCartCommand {
    pub customer_id: UserId,
    pub product_id: ProductId,
    pub quantity: i32,
}

pub struct AddToCartHandler {
    cart: Arc<dyn CartRepository>,
    products: Arc<dyn ProductRepository>,
}

impl AddToCartHandler {
    pub fn new(cart: Arc<dyn CartRepository>, products: Arc<dyn ProductRepository>) -> Self {
        Self { cart, products }
    }

    pub async fn handle(&self, cmd: AddToCartCommand) -> Result<CartItem, CustomerError> {
        let item = CartItem::new(cmd.customer_id, cmd.product_id, cmd.quantity)?;

        if self.products.find_by_id(&cmd.product_id).await?.is_none() {
            return Err(CustomerError::ProductNotFound(cmd.product_id));
        }

        self.cart.create(&item).await?;
        tracing::info!(cart_item_id = %item.id, customer_id = %item.customer_id, "Added to cart");
        Ok(item)
    }
}

#[derive(Debug, Clone)]
pub struct ListCartQuery {
    pub customer_id: UserId,
}

pub struct ListCartHandler {
    cart: Arc<dyn CartRepository>,
}

impl ListCartHandler {
    pub fn new(cart: Arc<dyn CartRepository>) -> Self {
        Self { cart }
    }

    pub async fn handle(&self, query: ListCartQuery) -> Result<Vec<CartItem>, CustomerError> {
        Ok(self.cart.list_by_customer(&query.customer_id).await?)
    }
}

#[derive(Debug, Clone)]
pub struct RemoveCartItemCommand {
    pub customer_id: UserId,
    pub cart_item_id: CartItemId,
}

pub struct RemoveCartItemHandler {
    cart: Arc<dyn CartRepository>,
}

impl RemoveCartItemHandler {
    pub fn new(cart: Arc<dyn CartRepository>) -> Self {
        Self { cart }
    }

    /// Rows owned by someone else are reported as missing.
    pub async fn handle(&self, cmd: RemoveCartItemCommand) -> Result<(), CustomerError> {
        let item = self
            .cart
            .find_by_id(&cmd.cart_item_id)
            .await?
            .filter(|item| item.is_owned_by(&cmd.customer_id))
            .ok_or(CustomerError::CartItemNotFound(cmd.cart_item_id))?;

        if item.is_paid() {
            return Err(CustomerError::CartItemAlreadyPaid(item.id));
        }

        self.cart.delete(&item.id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryCartRepository, InMemoryProductRepository};
    use crate::domain::catalog::Product;
    use crate::domain::foundation::{CategoryId, Timestamp};

    async fn product(repo: &InMemoryProductRepository) -> ProductId {
        let product = Product::new("Senator", 25000.0, None, CategoryId::new(), 3).unwrap();
        repo.create(&product).await.unwrap();
        product.id
    }

    fn add_handler(
        cart: &InMemoryCartRepository,
        products: &InMemoryProductRepository,
    ) -> AddToCartHandler {
        AddToCartHandler::new(Arc::new(cart.clone()), Arc::new(products.clone()))
    }

    #[tokio::test]
    async fn add_creates_pending_row() {
        let cart = InMemoryCartRepository::new();
        let products = InMemoryProductRepository::new();
        let product_id = product(&products).await;
        let customer = UserId::new();

        let item = add_handler(&cart, &products)
            .handle(AddToCartCommand {
                customer_id: customer,
                product_id,
                quantity: 2,
            })
            .await
            .unwrap();

        assert!(!item.is_paid());
        let listed = ListCartHandler::new(Arc::new(cart))
            .handle(ListCartQuery {
                customer_id: customer,
            })
            .await
            .unwrap();
        assert_eq!(listed, vec![item]);
    }

    #[tokio::test]
    async fn add_unknown_product_is_not_found() {
        let cart = InMemoryCartRepository::new();
        let products = InMemoryProductRepository::new();
        let missing = ProductId::new();

        let err = add_handler(&cart, &products)
            .handle(AddToCartCommand {
                customer_id: UserId::new(),
                product_id: missing,
                quantity: 1,
            })
            .await
            .unwrap_err();

        assert_eq!(err, CustomerError::ProductNotFound(missing));
    }

    #[tokio::test]
    async fn add_zero_quantity_is_validation_error() {
        let cart = InMemoryCartRepository::new();
        let products = InMemoryProductRepository::new();
        let product_id = product(&products).await;

        let err = add_handler(&cart, &products)
            .handle(AddToCartCommand {
                customer_id: UserId::new(),
                product_id,
                quantity: 0,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, CustomerError::ValidationFailed { ref field, .. } if field == "quantity"));
        assert_eq!(cart.item_count().await, 0);
    }

    #[tokio::test]
    async fn remove_someone_elses_row_is_not_found() {
        let cart = InMemoryCartRepository::new();
        let item = CartItem::new(UserId::new(), ProductId::new(), 1).unwrap();
        cart.create(&item).await.unwrap();

        let err = RemoveCartItemHandler::new(Arc::new(cart.clone()))
            .handle(RemoveCartItemCommand {
                customer_id: UserId::new(),
                cart_item_id: item.id,
            })
            .await
            .unwrap_err();

        assert_eq!(err, CustomerError::CartItemNotFound(item.id));
        assert_eq!(cart.item_count().await, 1);
    }

    #[tokio::test]
    async fn remove_paid_row_conflicts() {
        let cart = InMemoryCartRepository::new();
        let item = CartItem::new(UserId::new(), ProductId::new(), 1).unwrap();
        cart.create(&item).await.unwrap();
        cart.mark_paid(&item.id, Timestamp::now(), 100).await.unwrap();

        let err = RemoveCartItemHandler::new(Arc::new(cart))
            .handle(RemoveCartItemCommand {
                customer_id: item.customer_id,
                cart_item_id: item.id,
            })
            .await
            .unwrap_err();

        assert_eq!(err, CustomerError::CartItemAlreadyPaid(item.id));
    }

    #[tokio::test]
    async fn remove_own_pending_row() {
        let cart = InMemoryCartRepository::new();
        let item = CartItem::new(UserId::new(), ProductId::new(), 1).unwrap();
        cart.create(&item).await.unwrap();

        RemoveCartItemHandler::new(Arc::new(cart.clone()))
            .handle(RemoveCartItemCommand {
                customer_id: item.customer_id,
                cart_item_id: item.id,
            })
            .await
            .unwrap();

        assert_eq!(cart.item_count().await, 0);
    }
}
