//! Customer repository port.
//!
//! Persists user accounts together with their customer profile. A
//! customer row always shares its id with exactly one user row.

use crate::domain::customer::{Customer, User};
use crate::domain::foundation::{DomainError, UserId};
use async_trait::async_trait;

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Returns true if any user already has this phone number.
    async fn phone_exists(&self, phone: &str) -> Result<bool, DomainError>;

    /// Returns true if any user already has this (normalized) email.
    async fn email_exists(&self, email: &str) -> Result<bool, DomainError>;

    /// Inserts the user and customer rows atomically.
    ///
    /// # Errors
    ///
    /// - `UserExists` with detail `field` = `phone` or `email` when a
    ///   unique constraint fires (a concurrent registration won the race)
    /// - `DatabaseError` on persistence failure
    async fn create(&self, user: &User, customer: &Customer) -> Result<(), DomainError>;

    /// Finds a user account by email, for login.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Finds a customer profile by user id.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<Customer>, DomainError>;

    /// Persists an edited profile.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if no such customer
    async fn update(&self, customer: &Customer) -> Result<(), DomainError>;
}
