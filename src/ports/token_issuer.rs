//! Access token issuing port.

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// A freshly issued bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
    /// Seconds until the token expires.
    pub expires_in: i64,
}

/// Issues bearer tokens that the matching `SessionValidator` accepts.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user: &AuthenticatedUser) -> Result<IssuedToken, AuthError>;
}
