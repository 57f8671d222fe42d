//! # Redirect API
//!
//! A small HTTP service that stores and serves URL redirect mappings
//! ("from path" → "to path") backed by Redis.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer
//! separation:
//!
//! - **Domain Layer** ([`domain`]) - The redirect resource model
//! - **Application Layer** ([`application`]) - Store access and authorization services
//! - **Infrastructure Layer** ([`infrastructure`]) - Key-value backend implementations
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Opaque, reversible resource identifiers (URL-safe base64 of the source path)
//! - Cursor-based pagination over a scan-style backend
//! - Create-vs-update distinction on upsert (201 / 200)
//! - Permission-gated mutations via Bearer tokens
//! - Self links with optional forwarded-host rewriting for proxy deployments
//!
//! ## Quick Start
//!
//! ```bash
//! # Set required environment variables
//! export TOKEN_SIGNING_SECRET="change-me"
//! export REDIS_URL="redis://localhost:6379"  # Optional; in-memory store if unset
//!
//! # Start the service
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via
//! [`config::Config`]. See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AuthService, REDIRECTS_EDIT, RedirectService};
    pub use crate::domain::entities::{Redirect, RedirectPage};
    pub use crate::error::AppError;
    pub use crate::infrastructure::backend::{
        BackendError, BackendResult, MemoryBackend, RedirectBackend, RedisBackend, ScanPage,
    };
    pub use crate::state::AppState;
    pub use crate::utils::link_builder::LinkBuilder;
}
