//! Catalog query error types.
//!
//! Only transport-level failures are errors. GraphQL errors reported with a
//! 2xx status are part of the returned JSON value under `errors`.

use crate::auth::TokenMintError;
use crate::clients::HttpError;
use thiserror::Error;

/// Errors that can occur while querying the storefront GraphQL API.
#[derive(Debug, Error)]
pub enum QueryError {
    /// No storefront token could be obtained.
    #[error(transparent)]
    Token(#[from] TokenMintError),

    /// The GraphQL endpoint answered with a non-2xx status.
    #[error("Storefront query failed with status {status}: {body}")]
    Failed {
        /// The HTTP status code returned.
        status: u16,
        /// The raw response body.
        body: String,
    },

    /// The GraphQL endpoint answered 2xx with a body that is not JSON.
    #[error("Storefront query returned malformed JSON (status {status}): {body}")]
    MalformedResponse {
        /// The HTTP status code returned.
        status: u16,
        /// The raw response body.
        body: String,
    },

    /// The request could not be sent or no response was received.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl QueryError {
    /// Returns `true` for failures that may succeed if attempted again:
    /// timeouts, rate limiting, and server errors.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Token(e) => e.is_retryable(),
            Self::Failed { status, .. } => *status == 429 || *status >= 500,
            Self::Http(e) => e.is_timeout(),
            Self::MalformedResponse { .. } => false,
        }
    }

    /// Returns the HTTP status of the failed query response, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Failed { status, .. } | Self::MalformedResponse { status, .. } => Some(*status),
            _ => None,
        }
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<QueryError>();
};
