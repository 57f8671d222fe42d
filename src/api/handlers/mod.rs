//! HTTP request handlers for API endpoints.

pub mod health;
pub mod redirects;

pub use health::health_handler;
pub use redirects::{
    delete_redirect_handler, get_redirect_handler, list_redirects_handler, upsert_redirect_handler,
};
