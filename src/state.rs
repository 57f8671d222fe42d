use std::sync::Arc;

use crate::application::services::{AuthService, RedirectService};
use crate::utils::link_builder::LinkBuilder;

/// Shared application state injected into all handlers.
///
/// Holds no per-request data: every request re-reads and re-writes the
/// backend through [`RedirectService`].
#[derive(Clone)]
pub struct AppState {
    pub redirects: Arc<RedirectService>,
    pub auth: Arc<AuthService>,
    pub links: LinkBuilder,
    /// When true, self links in list responses are rebuilt against the
    /// forwarded host of the incoming request.
    pub enable_url_rewriting: bool,
}

impl AppState {
    pub fn new(
        redirects: Arc<RedirectService>,
        auth: Arc<AuthService>,
        links: LinkBuilder,
        enable_url_rewriting: bool,
    ) -> Self {
        Self {
            redirects,
            auth,
            links,
            enable_url_rewriting,
        }
    }
}
