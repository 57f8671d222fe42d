//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup, validated before the server
//! starts, and passed by reference into the components that need it —
//! never accessed through ambient global state.
//!
//! ## Configuration Methods
//!
//! ### Method 1: Full URL (simpler for local development)
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379/0"
//! ```
//!
//! ### Method 2: Individual components (recommended for production)
//!
//! ```bash
//! export REDIS_HOST="localhost"
//! export REDIS_PORT="6379"
//! export REDIS_PASSWORD=""
//! export REDIS_DB="0"
//! ```
//!
//! If neither is set the service falls back to a non-persistent in-memory
//! store, which is only suitable for development and tests.
//!
//! ## Required Variables
//!
//! - `TOKEN_SIGNING_SECRET` - HMAC key for hashing API tokens
//!
//! ## Optional Variables
//!
//! - `REDIS_URL` / `REDIS_HOST` - Redis connection (in-memory store if unset)
//! - `LISTEN` - Bind address (default: `0.0.0.0:29900`)
//! - `API_URL` - Public base URL used for self links (default: `http://localhost:29900`)
//! - `ENABLE_URL_REWRITING` - Rebuild self links from forwarded-host headers (default: false)
//! - `API_TOKENS` - Comma-separated tokens granted the `redirects:edit` permission
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis connection string; `None` selects the in-memory store.
    pub redis_url: Option<String>,
    pub listen_addr: String,
    /// Public base URL the service is reachable at; self links in list
    /// responses are built against it.
    pub api_url: String,
    /// When true, self links honor `X-Forwarded-Host` / `X-Forwarded-Proto`
    /// so responses carry the public hostname behind a reverse proxy.
    pub enable_url_rewriting: bool,
    pub log_level: String,
    pub log_format: String,
    /// HMAC signing secret used to hash API tokens before comparison.
    /// Loaded from `TOKEN_SIGNING_SECRET`. Must be non-empty.
    pub token_signing_secret: String,
    /// Raw tokens granted the `redirects:edit` permission. Hashed at
    /// startup; the raw material is not retained afterwards.
    pub api_tokens: Vec<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `TOKEN_SIGNING_SECRET` is missing.
    pub fn from_env() -> Result<Self> {
        let redis_url = Self::load_redis_url();

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:29900".to_string());
        let api_url = env::var("API_URL").unwrap_or_else(|_| "http://localhost:29900".to_string());

        let enable_url_rewriting = env::var("ENABLE_URL_REWRITING")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let token_signing_secret =
            env::var("TOKEN_SIGNING_SECRET").context("TOKEN_SIGNING_SECRET must be set")?;

        let api_tokens = env::var("API_TOKENS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            redis_url,
            listen_addr,
            api_url,
            enable_url_rewriting,
            log_level,
            log_format,
            token_signing_secret,
            api_tokens,
        })
    }

    /// Loads Redis URL with fallback to component-based configuration.
    ///
    /// Priority:
    /// 1. `REDIS_URL` environment variable
    /// 2. Constructed from `REDIS_HOST`, `REDIS_PORT`, `REDIS_PASSWORD`, `REDIS_DB`
    ///
    /// Returns `None` if Redis is not configured.
    fn load_redis_url() -> Option<String> {
        if let Ok(url) = env::var("REDIS_URL") {
            return Some(url);
        }

        let host = env::var("REDIS_HOST").ok()?;
        let port = env::var("REDIS_PORT").unwrap_or_else(|_| "6379".to_string());
        let password = env::var("REDIS_PASSWORD").ok();
        let db = env::var("REDIS_DB").unwrap_or_else(|_| "0".to_string());

        let url = if let Some(pwd) = password {
            // Empty password means no authentication
            if pwd.is_empty() {
                format!("redis://{}:{}/{}", host, port, db)
            } else {
                format!("redis://:{}@{}:{}/{}", pwd, host, port, db)
            }
        } else {
            format!("redis://{}:{}/{}", host, port, db)
        };

        Some(url)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `listen_addr` is not in `host:port` form
    /// - `api_url` is not a valid http(s) URL
    /// - `redis_url` does not use a redis scheme
    /// - `log_format` is not `text` or `json`
    /// - `token_signing_secret` is empty
    pub fn validate(&self) -> Result<()> {
        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        let api_url = url::Url::parse(&self.api_url)
            .with_context(|| format!("API_URL is not a valid URL: '{}'", self.api_url))?;
        if api_url.scheme() != "http" && api_url.scheme() != "https" {
            anyhow::bail!(
                "API_URL must start with 'http://' or 'https://', got '{}'",
                self.api_url
            );
        }

        if let Some(ref redis_url) = self.redis_url
            && !redis_url.starts_with("redis://")
            && !redis_url.starts_with("rediss://")
        {
            anyhow::bail!(
                "REDIS_URL must start with 'redis://' or 'rediss://', got '{}'",
                redis_url
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if self.token_signing_secret.is_empty() {
            anyhow::bail!("TOKEN_SIGNING_SECRET must not be empty");
        }

        Ok(())
    }

    /// Returns whether the Redis store is configured.
    pub fn is_redis_enabled(&self) -> bool {
        self.redis_url.is_some()
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  API URL: {}", self.api_url);

        if let Some(ref redis_url) = self.redis_url {
            tracing::info!("  Redis: {}", mask_connection_string(redis_url));
        } else {
            tracing::info!("  Redis: not configured (in-memory store)");
        }

        tracing::info!("  URL rewriting: {}", self.enable_url_rewriting);
        tracing::info!("  Edit tokens configured: {}", self.api_tokens.len());
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Masks sensitive information in connection strings for logging.
///
/// Replaces password with `***` in URLs like:
/// - `redis://:password@host:port/db` → `redis://:***@host:port/db`
fn mask_connection_string(url: &str) -> String {
    if let Some(start) = url.find("://") {
        let scheme_end = start + 3;
        let rest = &url[scheme_end..];

        if let Some(at_pos) = rest.find('@') {
            let credentials = &rest[..at_pos];
            let host_part = &rest[at_pos..];

            if let Some(colon_pos) = credentials.rfind(':') {
                let username = &credentials[..colon_pos];
                return format!("{}://{}:***{}", &url[..start], username, host_part);
            }
        }
    }

    url.to_string()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn base_config() -> Config {
        Config {
            redis_url: Some("redis://localhost:6379/0".to_string()),
            listen_addr: "0.0.0.0:29900".to_string(),
            api_url: "http://localhost:29900".to_string(),
            enable_url_rewriting: false,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            token_signing_secret: "test-secret".to_string(),
            api_tokens: vec!["token-1".to_string()],
        }
    }

    #[test]
    fn test_mask_connection_string() {
        assert_eq!(
            mask_connection_string("redis://:password@localhost:6379/0"),
            "redis://:***@localhost:6379/0"
        );

        assert_eq!(
            mask_connection_string("redis://localhost:6379/0"),
            "redis://localhost:6379/0"
        );
    }

    #[test]
    fn test_config_validation() {
        let mut config = base_config();
        assert!(config.validate().is_ok());

        config.listen_addr = "29900".to_string();
        assert!(config.validate().is_err());
        config.listen_addr = "0.0.0.0:29900".to_string();

        config.api_url = "not a url".to_string();
        assert!(config.validate().is_err());
        config.api_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
        config.api_url = "https://api.example.com".to_string();
        assert!(config.validate().is_ok());

        config.redis_url = Some("mysql://localhost/test".to_string());
        assert!(config.validate().is_err());
        config.redis_url = None;
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());
        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.token_signing_secret = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_load_redis_url_from_components() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("REDIS_HOST", "redis-host");
            env::set_var("REDIS_PORT", "6380");
            env::set_var("REDIS_DB", "1");
        }

        let url = Config::load_redis_url().unwrap();
        assert_eq!(url, "redis://redis-host:6380/1");

        // Test with password
        unsafe {
            env::set_var("REDIS_PASSWORD", "secret");
        }
        let url = Config::load_redis_url().unwrap();
        assert_eq!(url, "redis://:secret@redis-host:6380/1");

        // Test with empty password (should be treated as no password)
        unsafe {
            env::set_var("REDIS_PASSWORD", "");
        }
        let url = Config::load_redis_url().unwrap();
        assert_eq!(url, "redis://redis-host:6380/1");

        // Cleanup
        unsafe {
            env::remove_var("REDIS_HOST");
            env::remove_var("REDIS_PORT");
            env::remove_var("REDIS_DB");
            env::remove_var("REDIS_PASSWORD");
        }
    }

    #[test]
    #[serial]
    fn test_redis_url_priority() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("REDIS_URL", "redis://from-url:6379/0");
            env::set_var("REDIS_HOST", "from-components");
        }

        let url = Config::load_redis_url().unwrap();

        // REDIS_URL should take priority
        assert!(url.contains("from-url"));
        assert!(!url.contains("from-components"));

        // Cleanup
        unsafe {
            env::remove_var("REDIS_URL");
            env::remove_var("REDIS_HOST");
        }
    }

    #[test]
    #[serial]
    fn test_redis_absent_means_memory_store() {
        // SAFETY: Tests are run serially
        unsafe {
            env::remove_var("REDIS_URL");
            env::remove_var("REDIS_HOST");
        }

        assert!(Config::load_redis_url().is_none());
    }

    #[test]
    #[serial]
    fn test_api_tokens_parsing() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("TOKEN_SIGNING_SECRET", "s");
            env::set_var("API_TOKENS", "alpha, beta ,,gamma");
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.api_tokens, vec!["alpha", "beta", "gamma"]);

        // Cleanup
        unsafe {
            env::remove_var("TOKEN_SIGNING_SECRET");
            env::remove_var("API_TOKENS");
        }
    }
}
