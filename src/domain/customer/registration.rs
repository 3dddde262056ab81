//! Customer registration input validation.

use once_cell::sync::Lazy;
use regex::Regex;

use super::errors::CustomerError;
use super::password_policy::meets_policy;
use super::profile::{validate_name, Customer, User};
use crate::domain::foundation::{Role, Timestamp, UserId, ValidationError};

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("Invalid regex"));

static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 \-]{5,30}$").expect("Invalid regex"));

/// Longest email accepted (matches the `users.email` column).
pub const MAX_EMAIL_LEN: usize = 128;

/// A registration request that has passed every local check.
///
/// Uniqueness of phone and email is checked later against the store.
#[derive(Clone)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    password: String,
}

impl Registration {
    /// Validates raw registration fields.
    ///
    /// Checks run in order: names, email, phone, password confirmation,
    /// password policy. The first failure is returned.
    pub fn validate(
        first_name: &str,
        last_name: &str,
        email: &str,
        phone: &str,
        password1: &str,
        password2: &str,
    ) -> Result<Self, CustomerError> {
        let first_name = validate_name("first_name", first_name)?;
        let last_name = validate_name("last_name", last_name)?;
        let email = normalize_email(email)?;
        let phone = normalize_phone(phone)?;

        if password1 != password2 {
            return Err(CustomerError::PasswordMismatch);
        }
        if !meets_policy(password1) {
            return Err(CustomerError::WeakPassword);
        }

        Ok(Self {
            first_name,
            last_name,
            email,
            phone,
            password: password1.to_string(),
        })
    }

    /// The plaintext password, for hashing only.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Builds the user row and customer profile for a new account.
    pub fn into_records(self, password_hash: String) -> (User, Customer) {
        let id = UserId::new();
        let now = Timestamp::now();
        let user = User {
            id,
            email: self.email.clone(),
            phone: self.phone.clone(),
            password_hash,
            is_verified: false,
            role: Role::Customer,
            created_at: now,
            updated_at: now,
        };
        let customer = Customer {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            date_of_birth: None,
            gender: None,
            address: None,
            image_url: None,
            created_at: now,
            updated_at: now,
        };
        (user, customer)
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Trims and lower-cases an email, then checks its shape.
pub fn normalize_email(email: &str) -> Result<String, CustomerError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Err(ValidationError::empty_field("email").into());
    }
    if email.len() > MAX_EMAIL_LEN || !EMAIL.is_match(&email) {
        return Err(ValidationError::invalid_format("email", "not a valid email address").into());
    }
    Ok(email)
}

fn normalize_phone(phone: &str) -> Result<String, CustomerError> {
    let phone = phone.trim();
    if phone.is_empty() {
        return Err(ValidationError::empty_field("phone").into());
    }
    if !PHONE.is_match(phone) {
        return Err(ValidationError::invalid_format("phone", "not a valid phone number").into());
    }
    Ok(phone.to_string())
}
