//! Tailor Shop API server.
//!
//! Loads configuration from `TAILOR_SHOP__*` variables, connects to
//! PostgreSQL and the image bucket, then serves the REST API until
//! Ctrl+C or SIGTERM.

use std::error::Error;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tailor_shop::adapters::auth::{Argon2PasswordHasher, JwtConfig, JwtTokenService};
use tailor_shop::adapters::http::{
    api_router, AppState, CustomerAppState, HttpSettings, PaymentAppState, ProductAppState,
};
use tailor_shop::adapters::paystack::{PaystackConfig, PaystackPaymentAdapter};
use tailor_shop::adapters::postgres::{
    PostgresCartRepository, PostgresCategoryRepository, PostgresCustomerRepository,
    PostgresFabricRepository, PostgresMeasurementRepository, PostgresProductRepository,
};
use tailor_shop::adapters::storage::S3ObjectStorage;
use tailor_shop::config::AppConfig;
use tailor_shop::domain::payment::PaystackWebhookVerifier;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;

    // RUST_LOG wins over the configured level
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.server.log_level.as_str().into());
    let json_layer = config
        .is_production()
        .then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!config.is_production()).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    config.validate()?;
    tracing::info!(environment = ?config.server.environment, "Configuration loaded");

    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await?;
    tracing::info!("Database pool created");

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Migrations applied");
    }

    let storage = Arc::new(S3ObjectStorage::connect(config.storage.to_s3()).await);
    let tokens = Arc::new(JwtTokenService::new(JwtConfig {
        secret: config.auth.jwt_secret.clone(),
        issuer: config.auth.jwt_issuer.clone(),
        ttl_secs: config.auth.token_ttl_secs,
    }));

    let paystack = PaystackConfig::new(config.payment.paystack_secret_key.clone())
        .with_base_url(config.payment.paystack_base_url.clone())
        .with_callback_url(config.payment.callback_url.clone());
    let verifier = PaystackWebhookVerifier::new(config.payment.paystack_secret_key.clone());

    let products = Arc::new(PostgresProductRepository::new(pool.clone()));
    let cart = Arc::new(PostgresCartRepository::new(pool.clone()));

    let state = AppState {
        customer: CustomerAppState {
            customers: Arc::new(PostgresCustomerRepository::new(pool.clone())),
            measurements: Arc::new(PostgresMeasurementRepository::new(pool.clone())),
            products: products.clone(),
            cart: cart.clone(),
            storage: storage.clone(),
            hasher: Arc::new(Argon2PasswordHasher::new()),
            tokens: tokens.clone(),
        },
        product: ProductAppState {
            categories: Arc::new(PostgresCategoryRepository::new(pool.clone())),
            products,
            fabrics: Arc::new(PostgresFabricRepository::new(pool.clone())),
            cart: cart.clone(),
            storage,
        },
        payment: PaymentAppState {
            cart,
            provider: Arc::new(PaystackPaymentAdapter::new(paystack)),
            verifier,
        },
        sessions: tokens,
    };

    let settings = HttpSettings {
        cors_origins: config.server.cors_origins_list(),
        request_timeout: config.server.request_timeout(),
        max_body_bytes: config.server.max_body_bytes,
    };
    let app = api_router(state, &settings);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("tailor-shop listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
