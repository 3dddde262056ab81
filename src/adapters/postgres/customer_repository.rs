//! PostgreSQL implementation of CustomerRepository.
//!
//! A customer is stored as a `users` row plus a `customers` row sharing the
//! same id. Both are written in one transaction.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::database_error;
use crate::domain::customer::{Customer, Gender, User};
use crate::domain::foundation::{DomainError, ErrorCode, Role, Timestamp, UserId};
use crate::ports::CustomerRepository;

const PHONE_CONSTRAINT: &str = "users_phone_key";
const EMAIL_CONSTRAINT: &str = "users_email_key";

/// PostgreSQL implementation of the CustomerRepository port.
#[derive(Clone)]
pub struct PostgresCustomerRepository {
    pool: PgPool,
}

impl PostgresCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    phone: String,
    password_hash: String,
    is_verified: bool,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role: Role = row.role.parse().map_err(|_| {
            DomainError::database(format!("Invalid role in users table: {}", row.role))
        })?;
        Ok(User {
            id: UserId::from_uuid(row.id),
            email: row.email,
            phone: row.phone,
            password_hash: row.password_hash,
            is_verified: row.is_verified,
            role,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    date_of_birth: Option<NaiveDate>,
    gender: Option<String>,
    address: Option<String>,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = DomainError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let gender = row
            .gender
            .as_deref()
            .map(str::parse::<Gender>)
            .transpose()
            .map_err(|e| DomainError::database(format!("Invalid gender in customers table: {}", e)))?;
        Ok(Customer {
            id: UserId::from_uuid(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            date_of_birth: row.date_of_birth,
            gender,
            address: row.address,
            image_url: row.image_url,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

/// Maps a unique violation on `users` to `UserExists` naming the field.
fn map_insert_error(e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        let field = match db_err.constraint() {
            Some(PHONE_CONSTRAINT) => Some("phone"),
            Some(EMAIL_CONSTRAINT) => Some("email"),
            _ => None,
        };
        if let Some(field) = field {
            return DomainError::new(ErrorCode::UserExists, format!("{} already registered", field))
                .with_detail("field", field);
        }
    }
    database_error("insert customer", e)
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
    async fn phone_exists(&self, phone: &str) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE phone = $1)")
            .bind(phone)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| database_error("check phone", e))
    }

    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| database_error("check email", e))
    }

    async fn create(&self, user: &User, customer: &Customer) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| database_error("begin transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO users (
                id, email, phone, password_hash, is_verified, role, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.password_hash)
        .bind(user.is_verified)
        .bind(user.role.as_str())
        .bind(user.created_at.as_datetime())
        .bind(user.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(map_insert_error)?;

        sqlx::query(
            r#"
            INSERT INTO customers (
                id, first_name, last_name, date_of_birth, gender, address, image_url,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(customer.id.as_uuid())
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(customer.date_of_birth)
        .bind(customer.gender.map(|g| g.as_str()))
        .bind(&customer.address)
        .bind(&customer.image_url)
        .bind(customer.created_at.as_datetime())
        .bind(customer.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(map_insert_error)?;

        tx.commit()
            .await
            .map_err(|e| database_error("commit customer", e))?;

        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, email, phone, password_hash, is_verified, role, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("find user", e))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<Customer>, DomainError> {
        let row: Option<CustomerRow> = sqlx::query_as(
            r#"
            SELECT c.id, c.first_name, c.last_name, u.email, u.phone, c.date_of_birth,
                   c.gender, c.address, c.image_url, c.created_at, c.updated_at
            FROM customers c
            JOIN users u ON u.id = c.id
            WHERE c.id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("find customer", e))?;

        row.map(Customer::try_from).transpose()
    }

    async fn update(&self, customer: &Customer) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE customers SET
                first_name = $2,
                last_name = $3,
                date_of_birth = $4,
                gender = $5,
                address = $6,
                image_url = $7,
                updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(customer.id.as_uuid())
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(customer.date_of_birth)
        .bind(customer.gender.map(|g| g.as_str()))
        .bind(&customer.address)
        .bind(&customer.image_url)
        .bind(customer.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("update customer", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("Customer not found: {}", customer.id),
            ));
        }

        Ok(())
    }
}
