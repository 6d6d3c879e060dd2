//! Store hash extraction.
//!
//! BigCommerce API paths embed the store hash, e.g.
//! `https://api.bigcommerce.com/stores/abcd1234/v3/`. The hash is taken from
//! the configured store URL rather than configured separately.

use std::fmt;

const STORES_SEGMENT: &str = "stores/";

/// The store identifier embedded in BigCommerce API paths.
///
/// Extraction never fails: a URL without a `stores/<hash>/` segment yields an
/// empty hash, which callers can detect with [`StoreHash::is_empty`].
///
/// # Example
///
/// ```rust
/// use bc_storefront::StoreHash;
///
/// let hash = StoreHash::from_store_url("https://api.bigcommerce.com/stores/abcd1234/v3/");
/// assert_eq!(hash.as_ref(), "abcd1234");
///
/// let hash = StoreHash::from_store_url("https://example.com/");
/// assert!(hash.is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct StoreHash(String);

impl StoreHash {
    /// Extracts the first non-empty segment that sits between `stores/` and
    /// the next `/`.
    ///
    /// Occurrences of `stores/` that are not followed by a non-empty,
    /// `/`-terminated segment are skipped. If none qualifies, the result is
    /// empty.
    #[must_use]
    pub fn from_store_url(url: &str) -> Self {
        url.match_indices(STORES_SEGMENT)
            .find_map(|(i, _)| {
                let rest = &url[i + STORES_SEGMENT.len()..];
                rest.find('/')
                    .filter(|&end| end > 0)
                    .map(|end| &rest[..end])
            })
            .map_or_else(Self::default, |hash| Self(hash.to_string()))
    }

    /// Returns `true` if no hash could be extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for StoreHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
