//! Pagination query parameters for the redirect list endpoint.
//!
//! The wire contract is string-typed: `count` and `cursor` arrive as raw
//! strings, are defaulted to `"10"` and `"0"`, and are parsed here so each
//! failure mode maps to its own error kind. The raw cursor string is echoed
//! back in the response so callers can compare it against `next_cursor` to
//! detect end-of-data.

use serde::Deserialize;

/// Default page size when `count` is absent.
pub const DEFAULT_COUNT: &str = "10";

/// Default cursor when `cursor` is absent (start of iteration).
pub const DEFAULT_CURSOR: &str = "0";

/// Errors produced while validating pagination parameters.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    #[error("the count must be an integer giving the requested number of redirects")]
    InvalidCount,

    #[error("the count must be a positive integer")]
    NegativeCount,

    #[error("the redirects cursor was invalid. It must be a positive integer")]
    InvalidCursor,
}

/// Raw pagination query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub count: Option<String>,
    pub cursor: Option<String>,
}

impl PaginationParams {
    /// The count parameter as supplied, or its default. An empty value is
    /// treated as absent.
    pub fn count_or_default(&self) -> &str {
        match self.count.as_deref() {
            None | Some("") => DEFAULT_COUNT,
            Some(count) => count,
        }
    }

    /// The cursor parameter as supplied, or its default. An empty value is
    /// treated as absent.
    pub fn cursor_or_default(&self) -> &str {
        match self.cursor.as_deref() {
            None | Some("") => DEFAULT_CURSOR,
            Some(cursor) => cursor,
        }
    }

    /// Parses and validates both parameters.
    ///
    /// # Validation
    ///
    /// - `count` must parse as an integer ([`PaginationError::InvalidCount`])
    ///   and must not be negative ([`PaginationError::NegativeCount`]);
    ///   zero is accepted as a valid, if degenerate, count.
    /// - `cursor` must parse as an unsigned integer
    ///   ([`PaginationError::InvalidCursor`]).
    ///
    /// # Returns
    ///
    /// `(count, cursor)` ready for the backend scan call.
    pub fn validate(&self) -> Result<(i64, u64), PaginationError> {
        let count: i64 = self
            .count_or_default()
            .parse()
            .map_err(|_| PaginationError::InvalidCount)?;

        if count < 0 {
            return Err(PaginationError::NegativeCount);
        }

        let cursor: u64 = self
            .cursor_or_default()
            .parse()
            .map_err(|_| PaginationError::InvalidCursor)?;

        Ok((count, cursor))
    }
}
