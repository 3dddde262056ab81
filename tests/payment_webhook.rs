//! Integration tests for payment initialization and the Paystack webhook.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use common::TestApp;
use serde_json::{json, Value};
use tailor_shop::ports::PaymentProviderError;

/// Registers a customer with one pending cart row. Returns (token, reference).
async fn pending_cart(app: &TestApp) -> (String, String) {
    let product_id = app.seed_product("Suit", "Navy two-piece", 85000.0).await;
    let token = app.customer_token("ada@example.com", "+2348000000001").await;
    let added = app
        .post("/customer/cart", Some(&token), json!({ "product_id": product_id }))
        .await;
    assert_eq!(added.status, StatusCode::CREATED);
    let reference = added.body["id"].as_str().unwrap().to_string();
    (token, reference)
}

fn charge_success(reference: &str, amount: i64) -> Value {
    json!({
        "event": "charge.success",
        "data": {
            "reference": reference,
            "amount": amount,
            "paid_at": "2026-03-14T10:30:00.000Z",
            "status": "success",
            "currency": "NGN",
        }
    })
}

// =============================================================================
// Initialize transaction
// =============================================================================

#[tokio::test]
async fn initialize_returns_checkout_url() {
    let app = TestApp::new();
    let (token, reference) = pending_cart(&app).await;

    let response = app
        .post(
            "/payment/initialize-transactions",
            Some(&token),
            json!({ "email": "ada@example.com", "amount": 8_500_000, "reference": reference }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["reference"], reference.as_str());
    assert!(response.body["authorization_url"]
        .as_str()
        .unwrap()
        .starts_with("https://"));

    let calls = app.provider.calls().await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].amount, 8_500_000);
}

#[tokio::test]
async fn initialize_requires_token() {
    let app = TestApp::new();

    let response = app
        .post(
            "/payment/initialize-transactions",
            None,
            json!({ "email": "ada@example.com", "amount": 100, "reference": "x" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn initialize_rejects_non_positive_amount() {
    let app = TestApp::new();
    let (token, reference) = pending_cart(&app).await;

    let response = app
        .post(
            "/payment/initialize-transactions",
            Some(&token),
            json!({ "email": "ada@example.com", "amount": 0, "reference": reference }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["details"]["field"], "amount");
}

#[tokio::test]
async fn initialize_with_unknown_reference_is_not_found() {
    let app = TestApp::new();
    let (token, _) = pending_cart(&app).await;

    let response = app
        .post(
            "/payment/initialize-transactions",
            Some(&token),
            json!({
                "email": "ada@example.com",
                "amount": 100,
                "reference": uuid::Uuid::new_v4().to_string(),
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(app.provider.calls().await.is_empty());
}

#[tokio::test]
async fn provider_failure_is_server_error() {
    let app = TestApp::new();
    let (token, reference) = pending_cart(&app).await;
    app.provider
        .fail_next(PaymentProviderError::network("connection reset"))
        .await;

    let response = app
        .post(
            "/payment/initialize-transactions",
            Some(&token),
            json!({ "email": "ada@example.com", "amount": 100, "reference": reference }),
        )
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
}

// =============================================================================
// Webhook
// =============================================================================

#[tokio::test]
async fn charge_success_marks_cart_paid() {
    let app = TestApp::new();
    let (token, reference) = pending_cart(&app).await;

    let response = app.webhook(&charge_success(&reference, 8_500_000), None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["received"], true);

    let cart = app.get("/customer/cart", Some(&token)).await;
    assert_eq!(cart.body[0]["status"], "paid");
    assert_eq!(cart.body[0]["amount_paid"], 8_500_000);
    assert!(cart.body[0]["paid_at"].is_string());
}

#[tokio::test]
async fn redelivery_is_idempotent() {
    let app = TestApp::new();
    let (token, reference) = pending_cart(&app).await;
    let event = charge_success(&reference, 8_500_000);

    let first = app.webhook(&event, None).await;
    let second = app.webhook(&event, None).await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.status, StatusCode::OK);
    let cart = app.get("/customer/cart", Some(&token)).await;
    assert_eq!(cart.body[0]["status"], "paid");
    assert_eq!(cart.body[0]["amount_paid"], 8_500_000);
}

#[tokio::test]
async fn paid_cart_cannot_be_initialized_or_removed() {
    let app = TestApp::new();
    let (token, reference) = pending_cart(&app).await;
    app.webhook(&charge_success(&reference, 8_500_000), None).await;

    let initialize = app
        .post(
            "/payment/initialize-transactions",
            Some(&token),
            json!({ "email": "ada@example.com", "amount": 100, "reference": reference }),
        )
        .await;
    let remove = app
        .delete(&format!("/customer/cart/{}", reference), Some(&token))
        .await;

    assert_eq!(initialize.status, StatusCode::CONFLICT);
    assert_eq!(remove.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn product_with_paid_cart_row_cannot_be_deleted() {
    let app = TestApp::new();
    let (token, reference) = pending_cart(&app).await;
    let event = charge_success(&reference, 8_500_000);
    app.webhook(&event, None).await;
    let cart = app.get("/customer/cart", Some(&token)).await;
    let product_id = cart.body[0]["product_id"].as_str().unwrap().to_string();

    let deleted = app
        .delete(&format!("/product/{}", product_id), Some(&app.admin_token()))
        .await;

    assert_eq!(deleted.status, StatusCode::CONFLICT);
    assert_eq!(deleted.body["code"], "PRODUCT_IN_USE");

    let redelivered = app.webhook(&event, None).await;
    assert_eq!(redelivered.status, StatusCode::OK);
    let cart = app.get("/customer/cart", Some(&token)).await;
    assert_eq!(cart.body[0]["status"], "paid");
    assert_eq!(cart.body[0]["amount_paid"], 8_500_000);
    let product = app.get(&format!("/product/{}", product_id), None).await;
    assert_eq!(product.status, StatusCode::OK);
}

#[tokio::test]
async fn other_events_are_acknowledged_without_change() {
    let app = TestApp::new();
    let (token, reference) = pending_cart(&app).await;
    let event = json!({
        "event": "transfer.success",
        "data": { "reference": reference }
    });

    let response = app.webhook(&event, None).await;

    assert_eq!(response.status, StatusCode::OK);
    let cart = app.get("/customer/cart", Some(&token)).await;
    assert_eq!(cart.body[0]["status"], "pending");
}

#[tokio::test]
async fn wrong_signature_is_rejected() {
    let app = TestApp::new();
    let (token, reference) = pending_cart(&app).await;

    let response = app
        .webhook(&charge_success(&reference, 100), Some("deadbeef"))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let cart = app.get("/customer/cart", Some(&token)).await;
    assert_eq!(cart.body[0]["status"], "pending");
}

#[tokio::test]
async fn missing_signature_is_rejected() {
    let app = TestApp::new();
    let request = Request::post("/payment/webhook")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(charge_success("whatever", 100).to_string()))
        .unwrap();

    let response = app.dispatch(request).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn signed_garbage_is_rejected() {
    let app = TestApp::new();
    let raw = "{not json";
    let request = Request::post("/payment/webhook")
        .header(header::CONTENT_TYPE, "application/json")
        .header(
            tailor_shop::domain::payment::SIGNATURE_HEADER,
            app.verifier.sign(raw.as_bytes()).unwrap(),
        )
        .body(Body::from(raw))
        .unwrap();

    let response = app.dispatch(request).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_reference_is_not_found() {
    let app = TestApp::new();

    let response = app
        .webhook(
            &charge_success(&uuid::Uuid::new_v4().to_string(), 100),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
