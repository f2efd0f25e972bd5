// ABOUTME: API token authentication middleware for the admin endpoints
// ABOUTME: Compares the X-API-Token header against the configured token

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, Method},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use crate::api::{AppState, ADMIN_LOGIN_PATH};
use crate::error::AppError;

/// Header name for API token
pub const API_TOKEN_HEADER: &str = "X-API-Token";

/// Cookie set by the admin login form so browsers can reach the admin pages
pub const ADMIN_TOKEN_COOKIE: &str = "clubdata_admin_token";

pub(crate) fn token_matches(provided: &str, expected: &str) -> bool {
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// Token from the `X-API-Token` header, or else from the admin cookie
fn request_token(headers: &HeaderMap) -> Option<&str> {
    if let Some(token) = headers
        .get(API_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
    {
        return Some(token);
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == ADMIN_TOKEN_COOKIE)
        .map(|(_, value)| value)
}

/// Browsers opening an admin page without credentials get the login form
fn wants_login_page(request: &Request) -> bool {
    request.method() == Method::GET && request.uri().path().starts_with("/admin/")
}

/// API token validation middleware
pub async fn api_token_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();

    // Skip authentication in development mode
    if state.dev_mode {
        debug!(path = %path, "Development mode active, skipping token validation");
        return Ok(next.run(request).await);
    }

    let Some(expected) = state.api_token.as_deref() else {
        warn!(path = %path, "Admin request rejected, no API token configured");
        return Err(AppError::Forbidden {
            message: "Admin access is disabled. Configure CLUBDATA_API_TOKEN.".to_string(),
        });
    };

    let token = match request_token(request.headers()) {
        Some(t) => t,
        None if wants_login_page(&request) => {
            debug!(path = %path, "No credentials, redirecting to admin login");
            return Ok(Redirect::to(ADMIN_LOGIN_PATH).into_response());
        }
        None => {
            warn!(path = %path, "Missing API token");
            return Err(AppError::Unauthorized {
                message: "API token required. Please include X-API-Token header.".to_string(),
            });
        }
    };

    if !token_matches(token, expected) {
        warn!(path = %path, "Invalid API token provided");
        return Err(AppError::Unauthorized {
            message: "Invalid API token".to_string(),
        });
    }

    debug!(path = %path, "API token validated successfully");
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, middleware, routing::get, Router};
    use clubdata_settings::ClubSettingsManager;
    use clubdata_storage::MemoryOptionStore;
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn test_handler() -> &'static str {
        "ok"
    }

    fn create_test_app(api_token: Option<&str>, dev_mode: bool) -> Router {
        let manager = ClubSettingsManager::new(Arc::new(MemoryOptionStore::new()));
        let state = AppState::new(manager, api_token.map(str::to_string), dev_mode);

        Router::new()
            .route("/admin/test", get(test_handler).post(test_handler))
            .layer(middleware::from_fn_with_state(
                state.clone(),
                api_token_middleware,
            ))
            .with_state(state)
    }

    fn request(token: Option<&str>) -> Request {
        let mut builder = Request::builder().uri("/admin/test");
        if let Some(token) = token {
            builder = builder.header(API_TOKEN_HEADER, token);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_valid_token_passes() {
        let app = create_test_app(Some("secret"), false);
        let response = app.oneshot(request(Some("secret"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_token_rejected() {
        let app = create_test_app(Some("secret"), false);
        let request = Request::builder()
            .method(Method::POST)
            .uri("/admin/test")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_wrong_token_rejected() {
        let app = create_test_app(Some("secret"), false);
        let response = app.oneshot(request(Some("secreT"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_token_cookie_passes() {
        let app = create_test_app(Some("secret"), false);
        let request = Request::builder()
            .uri("/admin/test")
            .header(header::COOKIE, "theme=dark; clubdata_admin_token=secret")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_wrong_token_cookie_rejected() {
        let app = create_test_app(Some("secret"), false);
        let request = Request::builder()
            .uri("/admin/test")
            .header(header::COOKIE, "clubdata_admin_token=guess")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_browser_page_without_credentials_redirects_to_login() {
        let app = create_test_app(Some("secret"), false);
        let response = app.oneshot(request(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/admin/login");
    }

    #[tokio::test]
    async fn test_no_configured_token_forbids() {
        let app = create_test_app(None, false);
        let response = app.oneshot(request(Some("anything"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_dev_mode_skips_check() {
        let app = create_test_app(None, true);
        let response = app.oneshot(request(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_token_comparison() {
        assert!(token_matches("abc", "abc"));
        assert!(!token_matches("abc", "abd"));
        assert!(!token_matches("ab", "abc"));
    }
}
