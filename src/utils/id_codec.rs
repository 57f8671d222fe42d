//! Reversible encoding between source paths and resource identifiers.
//!
//! A redirect has no stored id: the externally visible identifier is the
//! base64 form of its `from` path. The URL-safe alphabet is used in both
//! directions so ids can appear in URL path segments without escaping and
//! so that self links round-trip to the same id they were fetched with.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;

/// Encodes a source path into its opaque resource identifier.
pub fn encode_id(path: &str) -> String {
    URL_SAFE.encode(path.as_bytes())
}

/// Decodes a resource identifier back into the source path it was built from.
///
/// Returns `None` when the input is not valid URL-safe base64 or the decoded
/// bytes are not valid UTF-8. Callers must reject such ids before touching
/// the backend.
pub fn decode_id(id: &str) -> Option<String> {
    let bytes = URL_SAFE.decode(id).ok()?;
    String::from_utf8(bytes).ok()
}
