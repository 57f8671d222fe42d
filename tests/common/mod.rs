#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::routing::{delete, get, put};
use axum_test::TestServer;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;
use url::Url;

use redirect_api::api::handlers::{
    delete_redirect_handler, get_redirect_handler, health_handler, list_redirects_handler,
    upsert_redirect_handler,
};
use redirect_api::application::services::{AuthService, REDIRECTS_EDIT, RedirectService};
use redirect_api::infrastructure::backend::{
    BackendError, BackendResult, MemoryBackend, RedirectBackend, ScanPage,
};
use redirect_api::state::AppState;
use redirect_api::utils::link_builder::LinkBuilder;

pub const TEST_API_URL: &str = "http://localhost:29900";
pub const EDIT_TOKEN: &str = "test-edit-token";
pub const READ_ONLY_TOKEN: &str = "test-read-only-token";

/// Wraps a [`MemoryBackend`] and counts every operation, so tests can assert
/// that validation failures never reach the store.
#[derive(Default)]
pub struct CountingBackend {
    inner: MemoryBackend,
    pub gets: AtomicUsize,
    pub sets: AtomicUsize,
    pub deletes: AtomicUsize,
    pub scans: AtomicUsize,
    pub counts: AtomicUsize,
    pub last_deleted: Mutex<Option<String>>,
}

impl CountingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, from: &str, to: &str) {
        self.inner.set(from, to).await.unwrap();
    }

    pub fn total_calls(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
            + self.sets.load(Ordering::SeqCst)
            + self.deletes.load(Ordering::SeqCst)
            + self.scans.load(Ordering::SeqCst)
            + self.counts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RedirectBackend for CountingBackend {
    async fn get(&self, key: &str) -> BackendResult<String> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> BackendResult<()> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value).await
    }

    async fn delete(&self, key: &str) -> BackendResult<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        *self.last_deleted.lock().await = Some(key.to_string());
        self.inner.delete(key).await
    }

    async fn scan(&self, count: i64, cursor: u64) -> BackendResult<ScanPage> {
        self.scans.fetch_add(1, Ordering::SeqCst);
        self.inner.scan(count, cursor).await
    }

    async fn count_all(&self) -> BackendResult<i64> {
        self.counts.fetch_add(1, Ordering::SeqCst);
        self.inner.count_all().await
    }

    async fn health_check(&self) -> bool {
        self.inner.health_check().await
    }
}

/// A backend where every operation fails, for exercising 500 paths. Set
/// calls are counted so tests can assert a failed probe prevents the write.
#[derive(Default)]
pub struct FailingBackend {
    pub sets: AtomicUsize,
}

impl FailingBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RedirectBackend for FailingBackend {
    async fn get(&self, _key: &str) -> BackendResult<String> {
        Err(BackendError::Operation("connection refused".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> BackendResult<()> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        Err(BackendError::Operation("connection refused".to_string()))
    }

    async fn delete(&self, _key: &str) -> BackendResult<()> {
        Err(BackendError::Operation("connection refused".to_string()))
    }

    async fn scan(&self, _count: i64, _cursor: u64) -> BackendResult<ScanPage> {
        Err(BackendError::Operation("connection refused".to_string()))
    }

    async fn count_all(&self) -> BackendResult<i64> {
        Err(BackendError::Operation("connection refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

pub fn test_auth_service() -> AuthService {
    AuthService::new("test-signing-secret".to_string())
        .with_grants(&[EDIT_TOKEN.to_string()], REDIRECTS_EDIT)
        .with_grants(&[READ_ONLY_TOKEN.to_string()], "redirects:read")
}

pub fn create_test_state(backend: Arc<dyn RedirectBackend>) -> AppState {
    create_test_state_with_rewriting(backend, false)
}

pub fn create_test_state_with_rewriting(
    backend: Arc<dyn RedirectBackend>,
    enable_url_rewriting: bool,
) -> AppState {
    AppState::new(
        Arc::new(RedirectService::new(backend)),
        Arc::new(test_auth_service()),
        LinkBuilder::new(Url::parse(TEST_API_URL).unwrap()),
        enable_url_rewriting,
    )
}

/// A server with every redirect route mounted directly, bypassing
/// authorization middleware. Used to test handler behavior in isolation.
pub fn server_without_auth(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/v1/redirects", get(list_redirects_handler))
        .route("/v1/redirects/{id}", get(get_redirect_handler))
        .route("/v1/redirects/{id}", put(upsert_redirect_handler))
        .route("/v1/redirects/{id}", delete(delete_redirect_handler))
        .route("/health", get(health_handler))
        .with_state(state);
    TestServer::new(app).unwrap()
}

/// A server using the real route configuration, including the permission
/// middleware on mutating endpoints.
pub fn server_with_auth(state: AppState) -> TestServer {
    let app = Router::new()
        .nest("/v1", redirect_api::api::routes::routes(state.clone()))
        .with_state(state);
    TestServer::new(app).unwrap()
}
