//! Authorization service for permission-gated endpoints.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::collections::{HashMap, HashSet};

use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Permission required to create, update, or delete redirects.
pub const REDIRECTS_EDIT: &str = "redirects:edit";

/// Service authorizing API requests via Bearer tokens.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) at startup
/// and at request time, so raw token material is never held after
/// configuration loading. Each known token carries a set of granted
/// permissions; handlers never see the token, only the middleware's
/// approve/reject decision.
pub struct AuthService {
    signing_secret: String,
    grants: HashMap<String, HashSet<String>>,
}

impl AuthService {
    /// Creates an authorization service with an empty grant set.
    ///
    /// # Arguments
    ///
    /// - `signing_secret` - HMAC key; must match the value used when the
    ///   grant set was built
    pub fn new(signing_secret: String) -> Self {
        Self {
            signing_secret,
            grants: HashMap::new(),
        }
    }

    /// Grants `permission` to the given raw token.
    pub fn grant(&mut self, token: &str, permission: &str) {
        let hash = self.hash_token(token);
        self.grants
            .entry(hash)
            .or_default()
            .insert(permission.to_string());
    }

    /// Grants `permission` to every token in `tokens`, consuming the raw
    /// material.
    pub fn with_grants(mut self, tokens: &[String], permission: &str) -> Self {
        for token in tokens {
            self.grant(token, permission);
        }
        self
    }

    /// Hashes a raw token with HMAC-SHA256 using the server signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    fn hash_token(&self, token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Checks that `token` is known and carries `permission`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for an unknown token and
    /// [`AppError::Forbidden`] for a known token lacking the permission.
    pub fn authorize(&self, token: &str, permission: &str) -> Result<(), AppError> {
        let token_hash = self.hash_token(token);

        let Some(permissions) = self.grants.get(&token_hash) else {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Unknown token"}),
            ));
        };

        if !permissions.contains(permission) {
            return Err(AppError::forbidden(
                "Forbidden",
                json!({"reason": format!("Token does not grant {permission}")}),
            ));
        }

        Ok(())
    }
}
