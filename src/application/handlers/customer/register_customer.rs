//! RegisterCustomerHandler - Command handler for customer sign-up.

use std::sync::Arc;

use crate::domain::customer::{Customer, CustomerError, Registration};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{CustomerRepository, PasswordHasher};

/// Command to register a new customer.
#[derive(Clone)]
pub struct RegisterCustomerCommand {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password1: String,
    pub password2: String,
}

impl std::fmt::Debug for RegisterCustomerCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterCustomerCommand")
            .field("email", &self.email)
            .field("phone", &self.phone)
            .finish_non_exhaustive()
    }
}

/// Handler for registering customers.
pub struct RegisterCustomerHandler {
    repository: Arc<dyn CustomerRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl RegisterCustomerHandler {
    pub fn new(repository: Arc<dyn CustomerRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repository, hasher }
    }

    pub async fn handle(&self, cmd: RegisterCustomerCommand) -> Result<Customer, CustomerError> {
        // 1. Local validation: names, email, phone, passwords
        let registration = Registration::validate(
            &cmd.first_name,
            &cmd.last_name,
            &cmd.email,
            &cmd.phone,
            &cmd.password1,
            &cmd.password2,
        )?;

        // 2. Uniqueness, phone first
        if self.repository.phone_exists(&registration.phone).await? {
            return Err(CustomerError::PhoneExists(registration.phone));
        }
        if self.repository.email_exists(&registration.email).await? {
            return Err(CustomerError::EmailExists(registration.email));
        }

        // 3. Hash and persist
        let hash = self
            .hasher
            .hash(registration.password())
            .map_err(|e| CustomerError::infrastructure(e.to_string()))?;
        let (phone, email) = (registration.phone.clone(), registration.email.clone());
        let (user, customer) = registration.into_records(hash);

        self.repository
            .create(&user, &customer)
            .await
            .map_err(|e| conflict_or(e, phone, email))?;

        tracing::info!(customer_id = %customer.id, "Customer registered");
        Ok(customer)
    }
}

/// A concurrent registration can still trip the unique constraints.
fn conflict_or(err: DomainError, phone: String, email: String) -> CustomerError {
    if err.code != ErrorCode::UserExists {
        return err.into();
    }
    match err.details.get("field").map(String::as_str) {
        Some("email") => CustomerError::EmailExists(email),
        _ => CustomerError::PhoneExists(phone),
    }
}
