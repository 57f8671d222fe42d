//! Self-link construction for redirect resources.
//!
//! Links are built from a configured base API URL. When URL rewriting is
//! enabled the base can be overridden per request from forwarded-host
//! headers, so responses carry the public hostname even when the service
//! runs behind a reverse proxy.

use axum::http::{HeaderMap, header};
use url::Url;

/// Errors that can occur while deriving a link base from request headers.
#[derive(Debug, thiserror::Error)]
pub enum LinkBuilderError {
    #[error("forwarded host is not a valid URL host: {0}")]
    InvalidForwardedHost(String),
}

/// Builds absolute URLs pointing back at redirect resources.
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    api_url: Url,
}

impl LinkBuilder {
    /// Creates a builder rooted at the given API base URL.
    pub fn new(api_url: Url) -> Self {
        Self { api_url }
    }

    /// The base URL links are currently built against.
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Returns the self URL for a specific redirect id.
    pub fn build_redirect_self_url(&self, redirect_id: &str) -> String {
        let base = self.api_url.as_str().trim_end_matches('/');
        format!("{base}/v1/redirects/{redirect_id}")
    }

    /// Creates a builder from forwarded-host headers, falling back to
    /// `default` when no override is present.
    ///
    /// `X-Forwarded-Host` wins over the `Host` header; the scheme comes from
    /// `X-Forwarded-Proto` or, failing that, from `default`.
    ///
    /// # Errors
    ///
    /// Returns [`LinkBuilderError::InvalidForwardedHost`] when the supplied
    /// host does not form a valid URL. This is a server-side fault (the proxy
    /// sent garbage), not a client error.
    pub fn from_headers_or_default(
        headers: &HeaderMap,
        default: &Url,
    ) -> Result<Self, LinkBuilderError> {
        let forwarded_host = headers
            .get("x-forwarded-host")
            .or_else(|| headers.get(header::HOST))
            .and_then(|v| v.to_str().ok())
            // Proxies may append hops as a comma-separated list; the first
            // entry is the client-facing host.
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        let Some(host) = forwarded_host else {
            return Ok(Self::new(default.clone()));
        };

        let scheme = headers
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_else(|| default.scheme());

        let url = Url::parse(&format!("{scheme}://{host}"))
            .map_err(|_| LinkBuilderError::InvalidForwardedHost(host.to_string()))?;

        Ok(Self::new(url))
    }
}
