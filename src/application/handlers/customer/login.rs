//! LoginHandler - exchanges email and password for a bearer token.

use std::sync::Arc;

use crate::domain::customer::{normalize_email, CustomerError};
use crate::domain::foundation::{AuthenticatedUser, Role, UserId};
use crate::ports::{CustomerRepository, IssuedToken, PasswordHasher, TokenIssuer};

#[derive(Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user_id: UserId,
    pub role: Role,
    pub token: IssuedToken,
}

pub struct LoginHandler {
    repository: Arc<dyn CustomerRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl LoginHandler {
    pub fn new(
        repository: Arc<dyn CustomerRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            repository,
            hasher,
            tokens,
        }
    }

    /// Every credential failure is reported as `InvalidCredentials`.
    pub async fn handle(&self, cmd: LoginCommand) -> Result<LoginResult, CustomerError> {
        let email = normalize_email(&cmd.email).map_err(|_| CustomerError::InvalidCredentials)?;

        let user = self
            .repository
            .find_user_by_email(&email)
            .await?
            .ok_or(CustomerError::InvalidCredentials)?;

        let matches = self
            .hasher
            .verify(&cmd.password, &user.password_hash)
            .map_err(|e| CustomerError::infrastructure(e.to_string()))?;
        if !matches {
            tracing::debug!(user_id = %user.id, "Login rejected");
            return Err(CustomerError::InvalidCredentials);
        }

        let token = self
            .tokens
            .issue(&AuthenticatedUser::new(user.id, user.email, user.role))
            .map_err(|e| CustomerError::infrastructure(e.to_string()))?;

        Ok(LoginResult {
            user_id: user.id,
            role: user.role,
            token,
        })
    }
}
