//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`                 - Store counts (public)
//! - `POST /signup`, `/login`       - Accounts (public, rate limited)
//! - `GET  /v2/assignments`, `/v2/subjects`, `/v2/summary` - Catalog (public)
//! - `GET  /v2/revision-session`    - Bearer token required
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on the account routes
//! - **Authentication** - Bearer token on the session routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `rate_limit_enabled` - throttle `/signup` and `/login` per peer IP.
///   The limiter reads the peer address from connect info, so the server
///   must be started with `into_make_service_with_connect_info`.
pub fn app_router(state: AppState, rate_limit_enabled: bool) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(api_router(state, rate_limit_enabled))
}

/// The routed application without path normalization.
///
/// Integration tests drive this directly; it carries the same auth,
/// tracing and (optionally) rate-limit layers as [`app_router`].
pub fn api_router(state: AppState, rate_limit_enabled: bool) -> Router {
    let mut account_router = api::routes::account_routes();
    if rate_limit_enabled {
        account_router = account_router.layer(rate_limit::secure_layer());
    }

    let session_router = api::routes::session_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let v2_router = Router::new()
        .merge(api::routes::catalog_routes())
        .merge(session_router);

    Router::new()
        .route("/health", get(health_handler))
        .merge(account_router)
        .nest("/v2", v2_router)
        .with_state(state)
        .layer(tracing::layer())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn router() -> NormalizePath<Router> {
        app_router(AppState::with_defaults("secret".to_string()), false)
    }

    #[tokio::test]
    async fn test_trailing_slash_is_trimmed() {
        let response = router()
            .oneshot(Request::get("/v2/summary/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_account_routes_live_at_root() {
        let response = router()
            .oneshot(Request::post("/v2/login").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_session_routes_require_bearer() {
        let response = router()
            .oneshot(
                Request::get("/v2/revision-session")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
