//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`           - Health check: DB, storage, feedback, cache (public)
//! - `/api/auth/register|login` - Account creation and login (public)
//! - `/api/*`                 - Community API (Bearer token required)
//! - `/api/admin/*`           - Content management (admin Bearer token required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Authentication** - Bearer token, plus an admin role check for `/api/admin`
//! - **Body limit** - Raised for multipart image uploads only
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
/// - `max_image_bytes` - per-image upload limit, used to size multipart bodies
pub fn app_router(
    state: AppState,
    behind_proxy: bool,
    max_image_bytes: usize,
) -> NormalizePath<Router> {
    let public = rate_limit::limit(
        api::routes::public_routes(),
        rate_limit::SECURE,
        behind_proxy,
    );

    let members = rate_limit::limit(
        api::routes::protected(api::routes::member_routes(max_image_bytes), &state),
        rate_limit::STANDARD,
        behind_proxy,
    );

    let admin = rate_limit::limit(
        api::routes::admin_only(api::routes::admin_routes(max_image_bytes), &state),
        rate_limit::SECURE,
        behind_proxy,
    );

    let api_router = Router::new()
        .merge(public)
        .merge(members)
        .nest("/admin", admin);

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
