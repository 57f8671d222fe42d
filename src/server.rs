//! HTTP server initialization and runtime setup.
//!
//! Handles backend connection, service construction, and Axum server
//! lifecycle.

use crate::application::services::{AuthService, REDIRECTS_EDIT, RedirectService};
use crate::config::Config;
use crate::infrastructure::backend::{MemoryBackend, RedirectBackend, RedisBackend};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::link_builder::LinkBuilder;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Redis connection (with bounded retry) or in-memory fallback store
/// - Redirect and authorization services
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - The Redis connection cannot be established after retries
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let backend: Arc<dyn RedirectBackend> = if let Some(redis_url) = &config.redis_url {
        // Retry only at startup; request-path failures surface immediately.
        let strategy = ExponentialBackoff::from_millis(100).map(jitter).take(5);
        let backend = Retry::spawn(strategy, || RedisBackend::connect(redis_url)).await?;
        Arc::new(backend)
    } else {
        tracing::warn!("Redis not configured; redirects will not survive a restart");
        Arc::new(MemoryBackend::new())
    };

    let api_url = url::Url::parse(&config.api_url)?;

    let redirects = Arc::new(RedirectService::new(backend));
    let auth = Arc::new(
        AuthService::new(config.token_signing_secret.clone())
            .with_grants(&config.api_tokens, REDIRECTS_EDIT),
    );

    let state = AppState::new(
        redirects,
        auth,
        LinkBuilder::new(api_url),
        config.enable_url_rewriting,
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
