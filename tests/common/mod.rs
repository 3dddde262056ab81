//! Shared harness for the HTTP integration tests.
//!
//! Builds the full router over in-memory adapters with real JWT tokens, so
//! every request goes through the same middleware stack as production.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use secrecy::SecretString;
use serde_json::{json, Value};
use tower::ServiceExt;

use tailor_shop::adapters::auth::{JwtConfig, JwtTokenService, PlaintextPasswordHasher};
use tailor_shop::adapters::http::{
    api_router, AppState, CustomerAppState, HttpSettings, PaymentAppState, ProductAppState,
};
use tailor_shop::adapters::memory::{
    InMemoryCartRepository, InMemoryCategoryRepository, InMemoryCustomerRepository,
    InMemoryFabricRepository, InMemoryMeasurementRepository, InMemoryProductRepository,
};
use tailor_shop::adapters::paystack::MockPaymentProvider;
use tailor_shop::adapters::storage::InMemoryObjectStorage;
use tailor_shop::domain::foundation::{AuthenticatedUser, Role, UserId};
use tailor_shop::domain::payment::{PaystackWebhookVerifier, SIGNATURE_HEADER};
use tailor_shop::ports::TokenIssuer;

pub const PAYSTACK_SECRET: &str = "sk_test_integration_secret";
pub const CDN: &str = "https://cdn.test";
pub const PASSWORD: &str = "Secret1!";

/// 1x1 PNG header; enough for format sniffing.
pub const PNG_BASE64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8/5+hHgAHggJ/PchI7wAAAABJRU5ErkJggg==";

pub struct TestApp {
    pub router: Router,
    pub tokens: Arc<JwtTokenService>,
    pub provider: MockPaymentProvider,
    pub verifier: PaystackWebhookVerifier,
}

/// A JSON response split into status and parsed body.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    pub fn new() -> Self {
        let tokens = Arc::new(JwtTokenService::new(JwtConfig {
            secret: SecretString::new("integration-test-signing-secret-0123456789".to_string()),
            issuer: "tailor-shop".to_string(),
            ttl_secs: 3600,
        }));
        let provider = MockPaymentProvider::new();
        let verifier = PaystackWebhookVerifier::new(SecretString::new(PAYSTACK_SECRET.to_string()));

        let products = Arc::new(InMemoryProductRepository::new());
        let cart = Arc::new(InMemoryCartRepository::new());
        let storage = Arc::new(InMemoryObjectStorage::new(CDN));

        let state = AppState {
            customer: CustomerAppState {
                customers: Arc::new(InMemoryCustomerRepository::new()),
                measurements: Arc::new(InMemoryMeasurementRepository::new()),
                products: products.clone(),
                cart: cart.clone(),
                storage: storage.clone(),
                hasher: Arc::new(PlaintextPasswordHasher),
                tokens: tokens.clone(),
            },
            product: ProductAppState {
                categories: Arc::new(InMemoryCategoryRepository::new()),
                products,
                fabrics: Arc::new(InMemoryFabricRepository::new()),
                cart: cart.clone(),
                storage,
            },
            payment: PaymentAppState {
                cart,
                provider: Arc::new(provider.clone()),
                verifier: verifier.clone(),
            },
            sessions: tokens.clone(),
        };

        Self {
            router: api_router(state, &HttpSettings::default()),
            tokens,
            provider,
            verifier,
        }
    }

    /// Sends a request with an optional JSON body and bearer token.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.dispatch(request).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.send(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(Method::DELETE, uri, token, None).await
    }

    /// Posts a raw webhook body, signed when `signature` is `None`.
    pub async fn webhook(&self, payload: &Value, signature: Option<&str>) -> TestResponse {
        let raw = payload.to_string();
        let signature = match signature {
            Some(sig) => sig.to_string(),
            None => self.verifier.sign(raw.as_bytes()).unwrap(),
        };
        let request = Request::post("/payment/webhook")
            .header(header::CONTENT_TYPE, "application/json")
            .header(SIGNATURE_HEADER, signature)
            .body(Body::from(raw))
            .unwrap();

        self.dispatch(request).await
    }

    pub async fn dispatch(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        TestResponse { status, body }
    }

    /// A token for an admin that exists only in the token.
    pub fn admin_token(&self) -> String {
        let admin = AuthenticatedUser::new(UserId::new(), "admin@tailor.shop", Role::Admin);
        self.tokens.issue(&admin).unwrap().access_token
    }

    /// Registers a customer and logs in, returning the bearer token.
    pub async fn customer_token(&self, email: &str, phone: &str) -> String {
        let registered = self
            .post("/customer/register", None, registration(email, phone))
            .await;
        assert_eq!(registered.status, StatusCode::CREATED, "{}", registered.body);

        let login = self
            .post(
                "/customer/login",
                None,
                json!({ "email": email, "password": PASSWORD }),
            )
            .await;
        assert_eq!(login.status, StatusCode::OK, "{}", login.body);
        login.body["access_token"].as_str().unwrap().to_string()
    }

    /// Creates a category and a product in it, returning the product id.
    pub async fn seed_product(&self, category: &str, name: &str, price: f64) -> String {
        let admin = self.admin_token();
        let created = self
            .post("/product/categories", Some(&admin), json!({ "name": category }))
            .await;
        assert!(
            created.status == StatusCode::CREATED || created.status == StatusCode::CONFLICT,
            "{}",
            created.body
        );

        let product = self
            .post(
                "/product/add_product",
                Some(&admin),
                json!({
                    "name": name,
                    "price": price,
                    "category": category,
                    "stock_quantity": 5,
                }),
            )
            .await;
        assert_eq!(product.status, StatusCode::CREATED, "{}", product.body);
        product.body["id"].as_str().unwrap().to_string()
    }
}

pub fn registration(email: &str, phone: &str) -> Value {
    json!({
        "first_name": "Ada",
        "last_name": "Obi",
        "email": email,
        "phone": phone,
        "password1": PASSWORD,
        "password2": PASSWORD,
    })
}
