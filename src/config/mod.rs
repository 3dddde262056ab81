//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `TAILOR_SHOP` prefix and
//! `__` between nesting levels.
//!
//! # Example
//!
//! ```no_run
//! use tailor_shop::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod error;
mod payment;
mod server;
mod storage;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use server::{Environment, ServerConfig};
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Bind address, environment, logging and HTTP limits
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL connection
    pub database: DatabaseConfig,

    /// Access token signing
    pub auth: AuthConfig,

    /// Paystack
    pub payment: PaymentConfig,

    /// Image bucket
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` if present
    /// 2. Reads variables with the `TAILOR_SHOP` prefix
    /// 3. Splits nesting on `__`
    ///
    /// - `TAILOR_SHOP__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `TAILOR_SHOP__PAYMENT__PAYSTACK_SECRET_KEY=sk_...` -> `payment.paystack_secret_key`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or
    /// values do not parse.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TAILOR_SHOP")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic checks: URL schemes, key prefixes, pool bounds, secret length.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let environment = self.server.environment;
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        self.payment.validate(environment)?;
        self.storage.validate(environment)?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[(&str, &str)] = &[
        (
            "TAILOR_SHOP__DATABASE__URL",
            "postgresql://tailor@localhost/tailor_shop",
        ),
        (
            "TAILOR_SHOP__AUTH__JWT_SECRET",
            "a-very-long-signing-secret-for-tests-only",
        ),
        ("TAILOR_SHOP__PAYMENT__PAYSTACK_SECRET_KEY", "sk_test_xxx"),
        ("TAILOR_SHOP__STORAGE__BUCKET", "tailor-images"),
        (
            "TAILOR_SHOP__STORAGE__PUBLIC_BASE_URL",
            "https://cdn.example.com",
        ),
    ];

    const OPTIONAL: &[&str] = &[
        "TAILOR_SHOP__SERVER__PORT",
        "TAILOR_SHOP__SERVER__ENVIRONMENT",
    ];

    fn load_with(extra: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        for (key, value) in VARS.iter().chain(extra) {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        for (key, _) in VARS.iter().chain(extra) {
            env::remove_var(key);
        }
        for key in OPTIONAL {
            env::remove_var(key);
        }
        result
    }

    #[test]
    fn loads_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[]).unwrap();

        assert_eq!(config.database.url, "postgresql://tailor@localhost/tailor_shop");
        assert_eq!(config.storage.bucket, "tailor-images");
        assert_eq!(config.payment.paystack_secret_key.expose_secret(), "sk_test_xxx");
        assert_eq!(config.payment.paystack_base_url, "https://api.paystack.co");
    }

    #[test]
    fn minimal_config_is_valid() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[]).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn server_defaults_apply() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[]).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.auth.token_ttl_secs, 3600);
    }

    #[test]
    fn nested_overrides_apply() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[
            ("TAILOR_SHOP__SERVER__PORT", "3000"),
            ("TAILOR_SHOP__SERVER__ENVIRONMENT", "production"),
        ])
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert!(config.is_production());
    }

    #[test]
    fn missing_section_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::remove_var("TAILOR_SHOP__DATABASE__URL");
        assert!(AppConfig::load().is_err());
    }
}
