//! Authentication types for the domain layer.
//!
//! These types represent an authenticated caller extracted from a bearer
//! token. They have no dependency on the token format; the
//! `SessionValidator` port populates them.

use super::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Role carried by every user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Admin,
}

impl Role {
    /// Stable lowercase name used in tokens and the `users.role` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "admin" => Ok(Role::Admin),
            _ => Err(AuthError::InvalidToken),
        }
    }
}

/// Caller identity extracted from a validated token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The user account id.
    pub id: UserId,

    /// Email the token was issued for.
    pub email: String,

    pub role: Role,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, email: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            email: email.into(),
            role,
        }
    }

    /// Returns true if the caller may use admin-only operations.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Fails with `InsufficientPermissions` unless the caller holds `role`.
    ///
    /// Admins satisfy every role check.
    pub fn require_role(&self, role: Role) -> Result<(), AuthError> {
        if self.role == role || self.is_admin() {
            Ok(())
        } else {
            Err(AuthError::InsufficientPermissions)
        }
    }
}

/// Authentication errors that can occur during login or token validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    /// Email/password pair did not match an account.
    #[error("Incorrect email or password")]
    InvalidCredentials,

    /// Caller is authenticated but lacks the role for this action.
    #[error("Insufficient permissions")]
    InsufficientPermissions,

    /// Token signing or password hashing failed internally.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the caller should log in again.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidToken | AuthError::TokenExpired | AuthError::InvalidCredentials
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticated_user_new_creates_user() {
        let id = UserId::new();
        let user = AuthenticatedUser::new(id, "test@example.com", Role::Customer);

        assert_eq!(user.id, id);
        assert_eq!(user.email, "test@example.com");
        assert!(!user.is_admin());
    }

    #[test]
    fn customer_fails_admin_role_check() {
        let user = AuthenticatedUser::new(UserId::new(), "c@example.com", Role::Customer);
        assert!(matches!(
            user.require_role(Role::Admin),
            Err(AuthError::InsufficientPermissions)
        ));
        assert!(user.require_role(Role::Customer).is_ok());
    }

    #[test]
    fn admin_passes_every_role_check() {
        let user = AuthenticatedUser::new(UserId::new(), "a@example.com", Role::Admin);
        assert!(user.require_role(Role::Admin).is_ok());
        assert!(user.require_role(Role::Customer).is_ok());
    }

    #[test]
    fn role_parses_lowercase_names() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("customer".parse::<Role>().unwrap(), Role::Customer);
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    }

    #[test]
    fn auth_error_requires_reauthentication_for_token_errors() {
        assert!(AuthError::InvalidToken.requires_reauthentication());
        assert!(AuthError::TokenExpired.requires_reauthentication());
        assert!(AuthError::InvalidCredentials.requires_reauthentication());
        assert!(!AuthError::InsufficientPermissions.requires_reauthentication());
        assert!(!AuthError::service_unavailable("").requires_reauthentication());
    }
}
