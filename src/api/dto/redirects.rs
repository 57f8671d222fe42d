//! Request DTOs for redirect mutation endpoints.

use serde::Deserialize;

/// Request body for `PUT /v1/redirects/{id}`.
///
/// Missing fields deserialize to empty strings and are rejected by the
/// handler's validation chain rather than by the parser, so a body like
/// `{}` reports a field mismatch, not a parse failure.
#[derive(Debug, Deserialize)]
pub struct UpsertRedirectRequest {
    #[serde(default)]
    pub from: String,

    #[serde(default)]
    pub to: String,
}
