//! PostgreSQL implementations of the catalog repositories.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::database_error;
use crate::domain::catalog::{Category, Fabric, FabricPrice, Product};
use crate::domain::foundation::{
    CategoryId, DomainError, ErrorCode, FabricId, FabricPriceId, ProductId, Timestamp,
};
use crate::ports::{CategoryRepository, FabricRepository, ProductRepository};

const CATEGORY_NAME_CONSTRAINT: &str = "product_categories_name_lower_key";
const CART_PRODUCT_CONSTRAINT: &str = "cart_product_id_fkey";

// ════════════════════════════════════════════════════════════════════════════════
// Categories
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: CategoryId::from_uuid(row.id),
            name: row.name,
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn create(&self, category: &Category) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO product_categories (id, name, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(category.id.as_uuid())
        .bind(&category.name)
        .bind(category.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some(CATEGORY_NAME_CONSTRAINT) {
                    return DomainError::new(
                        ErrorCode::CategoryExists,
                        format!("category: {} exists", category.name),
                    );
                }
            }
            database_error("insert category", e)
        })?;

        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, DomainError> {
        let row: Option<CategoryRow> = sqlx::query_as(
            r#"
            SELECT id, name, created_at
            FROM product_categories
            WHERE lower(name) = lower($1)
            "#,
        )
        .bind(name.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("find category", e))?;

        Ok(row.map(Category::from))
    }

    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, DomainError> {
        let row: Option<CategoryRow> =
            sqlx::query_as("SELECT id, name, created_at FROM product_categories WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| database_error("find category", e))?;

        Ok(row.map(Category::from))
    }

    async fn list(&self) -> Result<Vec<Category>, DomainError> {
        let rows: Vec<CategoryRow> =
            sqlx::query_as("SELECT id, name, created_at FROM product_categories ORDER BY lower(name)")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| database_error("list categories", e))?;

        Ok(rows.into_iter().map(Category::from).collect())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Products
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    price: f64,
    description: Option<String>,
    category_id: Uuid,
    stock_quantity: i32,
    images: Json<Vec<String>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: ProductId::from_uuid(row.id),
            name: row.name,
            price: row.price,
            description: row.description,
            category_id: CategoryId::from_uuid(row.category_id),
            stock_quantity: row.stock_quantity,
            images: row.images.0,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

const PRODUCT_COLUMNS: &str =
    "id, name, price, description, category_id, stock_quantity, images, created_at, updated_at";

fn product_not_found(id: &ProductId) -> DomainError {
    DomainError::new(
        ErrorCode::ProductNotFound,
        format!("Product not found: {}", id),
    )
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn create(&self, product: &Product) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, price, description, category_id, stock_quantity, images,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.description)
        .bind(product.category_id.as_uuid())
        .bind(product.stock_quantity)
        .bind(Json(&product.images))
        .bind(product.created_at.as_datetime())
        .bind(product.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("insert product", e))?;

        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = $2,
                price = $3,
                description = $4,
                category_id = $5,
                stock_quantity = $6,
                images = $7,
                updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.description)
        .bind(product.category_id.as_uuid())
        .bind(product.stock_quantity)
        .bind(Json(&product.images))
        .bind(product.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("update product", e))?;

        if result.rows_affected() == 0 {
            return Err(product_not_found(&product.id));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "SELECT {} FROM products WHERE id = $1",
            PRODUCT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("find product", e))?;

        Ok(row.map(Product::from))
    }

    async fn list(&self, category: Option<&CategoryId>) -> Result<Vec<Product>, DomainError> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {} FROM products \
             WHERE ($1::uuid IS NULL OR category_id = $1) \
             ORDER BY created_at DESC",
            PRODUCT_COLUMNS
        ))
        .bind(category.map(|c| *c.as_uuid()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("list products", e))?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn delete(&self, id: &ProductId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.constraint() == Some(CART_PRODUCT_CONSTRAINT) {
                        return DomainError::new(
                            ErrorCode::ProductInUse,
                            format!("Product {} is referenced by cart items", id),
                        );
                    }
                }
                database_error("delete product", e)
            })?;

        if result.rows_affected() == 0 {
            return Err(product_not_found(id));
        }

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Fabrics
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct PostgresFabricRepository {
    pool: PgPool,
}

impl PostgresFabricRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FabricRow {
    id: Uuid,
    name: String,
    price: f64,
    category: Option<String>,
    images: Json<Vec<String>>,
    created_at: DateTime<Utc>,
}

impl From<FabricRow> for Fabric {
    fn from(row: FabricRow) -> Self {
        Fabric {
            id: FabricId::from_uuid(row.id),
            name: row.name,
            price: row.price,
            category: row.category,
            images: row.images.0,
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FabricPriceRow {
    id: Uuid,
    fabric_id: Uuid,
    product_category_id: Uuid,
    price: f64,
    updated_at: DateTime<Utc>,
}

impl From<FabricPriceRow> for FabricPrice {
    fn from(row: FabricPriceRow) -> Self {
        FabricPrice {
            id: FabricPriceId::from_uuid(row.id),
            fabric_id: FabricId::from_uuid(row.fabric_id),
            category_id: CategoryId::from_uuid(row.product_category_id),
            price: row.price,
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

#[async_trait]
impl FabricRepository for PostgresFabricRepository {
    async fn create(&self, fabric: &Fabric) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO fabrics (id, name, price, category, images, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(fabric.id.as_uuid())
        .bind(&fabric.name)
        .bind(fabric.price)
        .bind(&fabric.category)
        .bind(Json(&fabric.images))
        .bind(fabric.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("insert fabric", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &FabricId) -> Result<Option<Fabric>, DomainError> {
        let row: Option<FabricRow> = sqlx::query_as(
            "SELECT id, name, price, category, images, created_at FROM fabrics WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("find fabric", e))?;

        Ok(row.map(Fabric::from))
    }

    async fn list(&self) -> Result<Vec<Fabric>, DomainError> {
        let rows: Vec<FabricRow> = sqlx::query_as(
            "SELECT id, name, price, category, images, created_at FROM fabrics ORDER BY lower(name)",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("list fabrics", e))?;

        Ok(rows.into_iter().map(Fabric::from).collect())
    }

    async fn upsert_price(&self, price: &FabricPrice) -> Result<FabricPrice, DomainError> {
        let row: FabricPriceRow = sqlx::query_as(
            r#"
            INSERT INTO fabric_prices (id, fabric_id, product_category_id, price, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (fabric_id, product_category_id)
            DO UPDATE SET price = EXCLUDED.price, updated_at = EXCLUDED.updated_at
            RETURNING id, fabric_id, product_category_id, price, updated_at
            "#,
        )
        .bind(price.id.as_uuid())
        .bind(price.fabric_id.as_uuid())
        .bind(price.category_id.as_uuid())
        .bind(price.price)
        .bind(price.updated_at.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| database_error("upsert fabric price", e))?;

        Ok(FabricPrice::from(row))
    }

    async fn list_prices(&self, fabric_id: &FabricId) -> Result<Vec<FabricPrice>, DomainError> {
        let rows: Vec<FabricPriceRow> = sqlx::query_as(
            r#"
            SELECT id, fabric_id, product_category_id, price, updated_at
            FROM fabric_prices
            WHERE fabric_id = $1
            ORDER BY updated_at
            "#,
        )
        .bind(fabric_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("list fabric prices", e))?;

        Ok(rows.into_iter().map(FabricPrice::from).collect())
    }
}
