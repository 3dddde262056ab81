//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Settings for issuing and validating access tokens.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret
    pub jwt_secret: SecretString,

    /// `iss` claim written into and required from tokens
    #[serde(default = "default_issuer")]
    pub jwt_issuer: String,

    /// Access token lifetime in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: i64,
}

const MIN_SECRET_LEN: usize = 32;
const MAX_TOKEN_TTL_SECS: i64 = 30 * 24 * 3600;

impl AuthConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if secret.len() < MIN_SECRET_LEN {
            return Err(ValidationError::JwtSecretTooShort);
        }
        if !(60..=MAX_TOKEN_TTL_SECS).contains(&self.token_ttl_secs) {
            return Err(ValidationError::InvalidTokenTtl);
        }
        Ok(())
    }
}

fn default_issuer() -> String {
    "tailor-shop".to_string()
}

fn default_token_ttl() -> i64 {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str, ttl: i64) -> AuthConfig {
        AuthConfig {
            jwt_secret: SecretString::new(secret.to_string()),
            jwt_issuer: default_issuer(),
            token_ttl_secs: ttl,
        }
    }

    #[test]
    fn accepts_long_secret() {
        assert!(config(&"k".repeat(32), 3600).validate().is_ok());
    }

    #[test]
    fn rejects_short_secret() {
        assert_eq!(
            config("short", 3600).validate(),
            Err(ValidationError::JwtSecretTooShort)
        );
    }

    #[test]
    fn rejects_empty_secret() {
        assert!(matches!(
            config("", 3600).validate(),
            Err(ValidationError::MissingRequired(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_ttl() {
        let secret = "k".repeat(40);
        assert_eq!(config(&secret, 10).validate(), Err(ValidationError::InvalidTokenTtl));
        assert_eq!(
            config(&secret, MAX_TOKEN_TTL_SECS + 1).validate(),
            Err(ValidationError::InvalidTokenTtl)
        );
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let rendered = format!("{:?}", config("super-secret-signing-key-0123456789", 3600));
        assert!(!rendered.contains("super-secret"));
    }
}
