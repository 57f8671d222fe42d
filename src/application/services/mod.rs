//! Service implementations for the application layer.

pub mod auth_service;
pub mod redirect_service;

pub use auth_service::{AuthService, REDIRECTS_EDIT};
pub use redirect_service::RedirectService;
