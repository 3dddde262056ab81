//! Top-level router: every module router plus the shared middleware stack.

use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::{middleware, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use super::customer::{customer_router, CustomerAppState};
use super::health::health;
use super::middleware::{auth_middleware, AuthState};
use super::payment::{payment_router, PaymentAppState};
use super::product::{product_router, ProductAppState};

/// Everything the HTTP layer needs, already wired to adapters.
#[derive(Clone)]
pub struct AppState {
    pub customer: CustomerAppState,
    pub product: ProductAppState,
    pub payment: PaymentAppState,
    pub sessions: AuthState,
}

/// Limits and CORS policy applied to every route.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// Allowed origins; `*` allows any, empty disables CORS headers.
    pub cors_origins: Vec<String>,
    pub request_timeout: Duration,
    pub max_body_bytes: usize,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            cors_origins: Vec::new(),
            request_timeout: Duration::from_secs(30),
            max_body_bytes: 16 * 1024 * 1024,
        }
    }
}

/// Builds the application router.
///
/// Layer order, outermost first: trace, CORS, timeout, body limit, auth.
pub fn api_router(state: AppState, settings: &HttpSettings) -> Router {
    let customer: Router = customer_router().with_state(state.customer);
    let product: Router = product_router().with_state(state.product);
    let payment: Router = payment_router().with_state(state.payment);

    Router::new()
        .route("/health", get(health))
        .merge(customer)
        .merge(product)
        .merge(payment)
        .layer(middleware::from_fn_with_state(state.sessions, auth_middleware))
        .layer(DefaultBodyLimit::max(settings.max_body_bytes))
        .layer(TimeoutLayer::new(settings.request_timeout))
        .layer(cors_layer(&settings.cors_origins))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record("latency_ms", latency.as_millis() as u64);
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if origins.iter().any(|o| o == "*") {
        return base.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    base.allow_origin(AllowOrigin::list(parsed))
}
