//! Authentication middleware and extractors for axum.
//!
//! - `auth_middleware` validates `Authorization: Bearer <jwt>` and injects
//!   the `AuthenticatedUser` into request extensions
//! - `RequireAuth` requires any signed-in user (customer or admin)
//! - `RequireAdmin` additionally requires the admin role
//!
//! ```text
//! Request → auth_middleware → injects AuthenticatedUser into extensions
//!                                      ↓
//!                   Handler → RequireAuth / RequireAdmin read from extensions
//! ```
//!
//! Requests without a token pass through untouched so public routes keep
//! working; the extractors reject them where a user is required.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::adapters::http::error::ErrorResponse;
use crate::domain::foundation::{AuthError, AuthenticatedUser, Role};
use crate::ports::SessionValidator;

/// Auth middleware state - wraps the session validator.
pub type AuthState = Arc<dyn SessionValidator>;

/// Validates the bearer token, if one is present.
///
/// A present but invalid token is rejected with 401 even on public routes.
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token)
        .map(str::to_owned);

    let Some(token) = token else {
        return next.run(request).await;
    };

    match validator.validate(&token).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => AuthRejection::from(e).into_response(),
    }
}

/// Accepts `Bearer` in any letter case.
fn bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

/// Extractor that requires an authenticated user of any role.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(RequireAuth)
            .ok_or(AuthRejection::Unauthenticated)
    }
}

/// Extractor that requires an admin.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequireAuth(user) = RequireAuth::from_request_parts(parts, state).await?;
        user.require_role(Role::Admin)
            .map_err(|_| AuthRejection::Forbidden)?;
        Ok(RequireAdmin(user))
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRejection {
    /// No token, or the token did not validate.
    Unauthenticated,
    /// Token was valid but expired.
    Expired,
    /// Signed in, but without the required role.
    Forbidden,
    /// The validator itself failed.
    Unavailable,
}

impl From<AuthError> for AuthRejection {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::TokenExpired => AuthRejection::Expired,
            AuthError::InsufficientPermissions => AuthRejection::Forbidden,
            AuthError::ServiceUnavailable(msg) => {
                tracing::error!(error = %msg, "Token validation unavailable");
                AuthRejection::Unavailable
            }
            AuthError::InvalidToken | AuthError::InvalidCredentials => {
                AuthRejection::Unauthenticated
            }
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AuthRejection::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Could not validate credentials",
            ),
            AuthRejection::Expired => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "Token expired"),
            AuthRejection::Forbidden => (
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                "You do not have permission to perform this action",
            ),
            AuthRejection::Unavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "AUTH_UNAVAILABLE",
                "Authentication service unavailable",
            ),
        };

        let mut response = ErrorResponse::new(code, message).into_response_with(status);
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                header::HeaderValue::from_static("Bearer"),
            );
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockSessionValidator;
    use crate::domain::foundation::UserId;
    use axum::body::Body;
    use axum::routing::get;
    use axum::{middleware, Router};
    use tower::ServiceExt;

    fn user(role: Role) -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new(), "test@example.com", role)
    }

    fn parts_with(user: Option<AuthenticatedUser>) -> Parts {
        let mut request: axum::http::Request<()> =
            axum::http::Request::builder().uri("/test").body(()).unwrap();
        if let Some(user) = user {
            request.extensions_mut().insert(user);
        }
        request.into_parts().0
    }

    fn app() -> Router {
        let validator: AuthState = Arc::new(
            MockSessionValidator::new()
                .with_user("customer-token", user(Role::Customer))
                .with_user("admin-token", user(Role::Admin)),
        );
        Router::new()
            .route("/me", get(|RequireAuth(u): RequireAuth| async move { u.email }))
            .route("/admin", get(|_: RequireAdmin| async { "ok" }))
            .route("/public", get(|| async { "ok" }))
            .layer(middleware::from_fn_with_state(validator, auth_middleware))
    }

    async fn status(uri: &str, token: Option<&str>) -> StatusCode {
        let mut builder = axum::http::Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        app()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn require_auth_extracts_user_from_extensions() {
        let mut parts = parts_with(Some(user(Role::Customer)));

        let RequireAuth(u) = RequireAuth::from_request_parts(&mut parts, &()).await.unwrap();

        assert_eq!(u.email, "test@example.com");
    }

    #[tokio::test]
    async fn require_auth_fails_without_user() {
        let mut parts = parts_with(None);

        let result = RequireAuth::from_request_parts(&mut parts, &()).await;

        assert!(matches!(result, Err(AuthRejection::Unauthenticated)));
    }

    #[tokio::test]
    async fn require_admin_forbids_customers() {
        let mut parts = parts_with(Some(user(Role::Customer)));

        let result = RequireAdmin::from_request_parts(&mut parts, &()).await;

        assert!(matches!(result, Err(AuthRejection::Forbidden)));
    }

    #[tokio::test]
    async fn valid_token_reaches_handler() {
        assert_eq!(status("/me", Some("customer-token")).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized_on_protected_route() {
        assert_eq!(status("/me", None).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unknown_token_is_unauthorized_even_on_public_route() {
        assert_eq!(status("/public", Some("nope")).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn public_route_needs_no_token() {
        assert_eq!(status("/public", None).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn admin_route_checks_role() {
        assert_eq!(status("/admin", Some("customer-token")).await, StatusCode::FORBIDDEN);
        assert_eq!(status("/admin", Some("admin-token")).await, StatusCode::OK);
    }

    #[test]
    fn bearer_token_extraction() {
        assert_eq!(bearer_token("Bearer my-token"), Some("my-token"));
        assert_eq!(bearer_token("bearer my-token"), Some("my-token"));
        assert_eq!(bearer_token("Basic dXNlcjpwYXNz"), None);
        assert_eq!(bearer_token("my-token"), None);
        assert_eq!(bearer_token("Bearer "), None);
    }

    #[test]
    fn unauthorized_carries_www_authenticate() {
        let response = AuthRejection::Unauthenticated.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
    }

    #[test]
    fn expired_token_maps_to_expired() {
        assert_eq!(AuthRejection::from(AuthError::TokenExpired), AuthRejection::Expired);
    }
}
