//! PostgreSQL implementation of CartRepository.
//!
//! Cart row ids double as payment references, so `mark_paid` is the write
//! path for the payment webhook.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::database_error;
use crate::domain::cart::{CartItem, CartStatus};
use crate::domain::foundation::{
    CartItemId, DomainError, ErrorCode, ProductId, Timestamp, UserId,
};
use crate::ports::CartRepository;

#[derive(Clone)]
pub struct PostgresCartRepository {
    pool: PgPool,
}

impl PostgresCartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CartRow {
    id: Uuid,
    customer_id: Uuid,
    product_id: Uuid,
    quantity: i32,
    status: String,
    paid_at: Option<DateTime<Utc>>,
    amount_paid: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CartRow> for CartItem {
    type Error = DomainError;

    fn try_from(row: CartRow) -> Result<Self, Self::Error> {
        let status: CartStatus = row
            .status
            .parse()
            .map_err(|_| DomainError::database(format!("Invalid cart status: {}", row.status)))?;
        Ok(CartItem {
            id: CartItemId::from_uuid(row.id),
            customer_id: UserId::from_uuid(row.customer_id),
            product_id: ProductId::from_uuid(row.product_id),
            quantity: row.quantity,
            status,
            paid_at: row.paid_at.map(Timestamp::from_datetime),
            amount_paid: row.amount_paid,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

const CART_COLUMNS: &str =
    "id, customer_id, product_id, quantity, status, paid_at, amount_paid, created_at, updated_at";

#[async_trait]
impl CartRepository for PostgresCartRepository {
    async fn create(&self, item: &CartItem) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO cart (
                id, customer_id, product_id, quantity, status, paid_at, amount_paid,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(item.id.as_uuid())
        .bind(item.customer_id.as_uuid())
        .bind(item.product_id.as_uuid())
        .bind(item.quantity)
        .bind(item.status.as_str())
        .bind(item.paid_at.map(|t| *t.as_datetime()))
        .bind(item.amount_paid)
        .bind(item.created_at.as_datetime())
        .bind(item.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("insert cart item", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &CartItemId) -> Result<Option<CartItem>, DomainError> {
        let row: Option<CartRow> =
            sqlx::query_as(&format!("SELECT {} FROM cart WHERE id = $1", CART_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| database_error("find cart item", e))?;

        row.map(CartItem::try_from).transpose()
    }

    async fn list_by_customer(&self, customer_id: &UserId) -> Result<Vec<CartItem>, DomainError> {
        let rows: Vec<CartRow> = sqlx::query_as(&format!(
            "SELECT {} FROM cart WHERE customer_id = $1 ORDER BY created_at",
            CART_COLUMNS
        ))
        .bind(customer_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("list cart", e))?;

        rows.into_iter().map(CartItem::try_from).collect()
    }

    async fn references_product(&self, product_id: &ProductId) -> Result<bool, DomainError> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM cart WHERE product_id = $1)")
            .bind(product_id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| database_error("check cart references", e))
    }

    async fn delete(&self, id: &CartItemId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM cart WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("delete cart item", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::CartItemNotFound,
                format!("Cart item not found: {}", id),
            ));
        }

        Ok(())
    }

    async fn mark_paid(
        &self,
        id: &CartItemId,
        paid_at: Timestamp,
        amount: i64,
    ) -> Result<Option<CartItem>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| database_error("begin transaction", e))?;

        let locked: Option<Uuid> = sqlx::query_scalar("SELECT id FROM cart WHERE id = $1 FOR UPDATE")
            .bind(id.as_uuid())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| database_error("lock cart item", e))?;

        if locked.is_none() {
            // Dropping the transaction rolls it back.
            return Ok(None);
        }

        let row: CartRow = sqlx::query_as(&format!(
            r#"
            UPDATE cart SET
                status = $2,
                paid_at = $3,
                amount_paid = $4,
                updated_at = $5
            WHERE id = $1
            RETURNING {}
            "#,
            CART_COLUMNS
        ))
        .bind(id.as_uuid())
        .bind(CartStatus::Paid.as_str())
        .bind(paid_at.as_datetime())
        .bind(amount)
        .bind(Timestamp::now().as_datetime())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| database_error("mark cart item paid", e))?;

        tx.commit()
            .await
            .map_err(|e| database_error("commit payment", e))?;

        CartItem::try_from(row).map(Some)
    }
}
