//! Storefront bearer token.

use chrono::{DateTime, Utc};
use std::fmt;

/// A storefront API bearer token.
///
/// Tokens minted by this process carry the expiry that was requested from
/// the platform. Tokens read back from the option store have no known
/// expiry and are treated as valid.
///
/// The `Debug` implementation masks the token value:
///
/// ```rust
/// use bc_storefront::BearerToken;
///
/// let token = BearerToken::new("eyJ0eXAi", None);
/// assert_eq!(token.authorization_header(), "Bearer eyJ0eXAi");
/// assert!(!format!("{token:?}").contains("eyJ0eXAi"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken {
    value: String,
    expires_at: Option<DateTime<Utc>>,
}

impl BearerToken {
    /// Creates a token from its value and optional expiry.
    #[must_use]
    pub fn new(value: impl Into<String>, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            value: value.into(),
            expires_at,
        }
    }

    /// Returns the raw token value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns when the token expires, if known.
    #[must_use]
    pub const fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Returns `true` if the token has a known expiry in the past.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.expires_at.is_some_and(|expires| Utc::now() >= expires)
    }

    /// Returns the `Authorization` header value for this token.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.value)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerToken")
            .field("value", &"*****")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
