//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /health`        - Health check: backend connectivity (public)
//! - `/v1/redirects*`     - Redirect API (writes require `redirects:edit`)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket
//! - **Authorization** - Bearer token with permission check (writes only)
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
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let v1_router = api::routes::routes(state.clone()).layer(rate_limit::layer());

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/v1", v1_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
