//! In-memory customer and measurement repositories.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::customer::{Customer, Measurement, User};
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::{CustomerRepository, MeasurementRepository};

/// In-memory user accounts and customer profiles.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCustomerRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
    customers: Arc<RwLock<HashMap<UserId, Customer>>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a bare user account, e.g. an admin with no profile.
    pub async fn insert_user(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    /// Get the number of stored users
    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn phone_exists(&self, phone: &str) -> Result<bool, DomainError> {
        Ok(self.users.read().await.values().any(|u| u.phone == phone))
    }

    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.users.read().await.values().any(|u| u.email == email))
    }

    async fn create(&self, user: &User, customer: &Customer) -> Result<(), DomainError> {
        // Both locks are held so the uniqueness check and insert are atomic.
        let mut users = self.users.write().await;
        let mut customers = self.customers.write().await;

        if users.values().any(|u| u.phone == user.phone) {
            return Err(DomainError::new(ErrorCode::UserExists, "phone already registered")
                .with_detail("field", "phone"));
        }
        if users.values().any(|u| u.email == user.email) {
            return Err(DomainError::new(ErrorCode::UserExists, "email already registered")
                .with_detail("field", "email"));
        }

        users.insert(user.id, user.clone());
        customers.insert(customer.id, customer.clone());
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<Customer>, DomainError> {
        Ok(self.customers.read().await.get(id).cloned())
    }

    async fn update(&self, customer: &Customer) -> Result<(), DomainError> {
        let mut customers = self.customers.write().await;
        match customers.get_mut(&customer.id) {
            Some(existing) => {
                *existing = customer.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("Customer not found: {}", customer.id),
            )),
        }
    }
}

/// In-memory measurement rows keyed by customer.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMeasurementRepository {
    rows: Arc<RwLock<HashMap<UserId, Measurement>>>,
}

impl InMemoryMeasurementRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MeasurementRepository for InMemoryMeasurementRepository {
    async fn find_by_customer(
        &self,
        customer_id: &UserId,
    ) -> Result<Option<Measurement>, DomainError> {
        Ok(self.rows.read().await.get(customer_id).cloned())
    }

    async fn upsert(&self, measurement: &Measurement) -> Result<(), DomainError> {
        self.rows
            .write()
            .await
            .insert(measurement.customer_id, measurement.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::customer::Registration;

    fn records(email: &str, phone: &str) -> (User, Customer) {
        Registration::validate("Ada", "Obi", email, phone, "Passw0rd!", "Passw0rd!")
            .unwrap()
            .into_records("hash".to_string())
    }

    #[tokio::test]
    async fn create_then_find() {
        let repo = InMemoryCustomerRepository::new();
        let (user, customer) = records("ada@example.com", "08012345678");
        repo.create(&user, &customer).await.unwrap();

        assert!(repo.phone_exists("08012345678").await.unwrap());
        assert!(repo.email_exists("ada@example.com").await.unwrap());
        assert_eq!(repo.find_by_id(&user.id).await.unwrap(), Some(customer));
        assert!(repo
            .find_user_by_email("ada@example.com")
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn duplicate_phone_conflicts_with_field_detail() {
        let repo = InMemoryCustomerRepository::new();
        let (u1, c1) = records("ada@example.com", "08012345678");
        let (u2, c2) = records("obi@example.com", "08012345678");
        repo.create(&u1, &c1).await.unwrap();

        let err = repo.create(&u2, &c2).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::UserExists);
        assert_eq!(err.details.get("field").map(String::as_str), Some("phone"));
        assert_eq!(repo.user_count().await, 1);
    }

    #[tokio::test]
    async fn update_unknown_customer_is_not_found() {
        let repo = InMemoryCustomerRepository::new();
        let (_, customer) = records("ada@example.com", "08012345678");
        let err = repo.update(&customer).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::UserNotFound);
    }

    #[tokio::test]
    async fn measurement_upsert_overwrites() {
        let repo = InMemoryMeasurementRepository::new();
        let id = UserId::new();
        let mut m = Measurement::new(id);
        repo.upsert(&m).await.unwrap();
        m.values.neck = Some(40.0);
        repo.upsert(&m).await.unwrap();

        let stored = repo.find_by_customer(&id).await.unwrap().unwrap();
        assert_eq!(stored.values.neck, Some(40.0));
    }
}
