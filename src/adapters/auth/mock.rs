//! Mock authentication adapters for testing.
//!
//! # Example
//!
//! ```ignore
//! use tailor_shop::adapters::auth::MockSessionValidator;
//! use tailor_shop::domain::foundation::{AuthenticatedUser, Role, UserId};
//!
//! let validator = MockSessionValidator::new()
//!     .with_user("valid-token", AuthenticatedUser::new(
//!         UserId::new(),
//!         "test@example.com",
//!         Role::Customer,
//!     ));
//!
//! let result = validator.validate("valid-token").await;
//! assert!(result.is_ok());
//! ```

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, Role, UserId};
use crate::ports::{IssuedToken, PasswordHasher, SessionValidator, TokenIssuer};

/// Mock session validator for testing.
///
/// Stores a map of tokens to users. Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: HashMap<String, AuthenticatedUser>,
    force_error: Option<AuthError>,
}

impl MockSessionValidator {
    /// Creates a new empty mock validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a user.
    pub fn with_user(mut self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.tokens.insert(token.into(), user);
        self
    }

    /// Adds a valid token for a fresh user with the given role.
    pub fn with_test_user(self, token: impl Into<String>, role: Role) -> Self {
        let id = UserId::new();
        let user = AuthenticatedUser::new(id, format!("{}@test.example.com", id), role);
        self.with_user(token, user)
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(mut self, error: AuthError) -> Self {
        self.force_error = Some(error);
        self
    }

    /// Returns the user registered for `token`, if any.
    pub fn user_for(&self, token: &str) -> Option<&AuthenticatedUser> {
        self.tokens.get(token)
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = &self.force_error {
            return Err(error.clone());
        }

        self.tokens
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

/// Token issuer that encodes the user id into a predictable token.
#[derive(Debug, Default, Clone)]
pub struct MockTokenIssuer;

impl TokenIssuer for MockTokenIssuer {
    fn issue(&self, user: &AuthenticatedUser) -> Result<IssuedToken, AuthError> {
        Ok(IssuedToken {
            access_token: format!("mock-token-{}", user.id),
            expires_in: 3600,
        })
    }
}

/// Reversible "hasher" so tests avoid Argon2's cost.
#[derive(Debug, Default, Clone)]
pub struct PlaintextPasswordHasher;

impl PasswordHasher for PlaintextPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(format!("plain:{}", password))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        hash.strip_prefix("plain:")
            .map(|stored| stored == password)
            .ok_or_else(|| AuthError::service_unavailable("not a plaintext hash"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_validator_returns_registered_user() {
        let validator = MockSessionValidator::new().with_test_user("tok", Role::Admin);

        let user = validator.validate("tok").await.unwrap();

        assert_eq!(user.role, Role::Admin);
    }

    #[tokio::test]
    async fn mock_validator_rejects_unknown_token() {
        let validator = MockSessionValidator::new();
        assert!(matches!(
            validator.validate("nope").await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn mock_validator_forced_error() {
        let validator = MockSessionValidator::new()
            .with_test_user("tok", Role::Customer)
            .with_error(AuthError::TokenExpired);
        assert!(matches!(
            validator.validate("tok").await,
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn plaintext_hasher_roundtrip() {
        let hasher = PlaintextPasswordHasher;
        let hash = hasher.hash("Secret1!").unwrap();
        assert!(hasher.verify("Secret1!", &hash).unwrap());
        assert!(!hasher.verify("Secret2!", &hash).unwrap());
    }
}
