//! HTTP request types.
//!
//! Requests carry an absolute URL because the token and GraphQL endpoints
//! live on different hosts.

use std::collections::HashMap;
use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by the storefront integration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP POST method.
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Post => write!(f, "post"),
        }
    }
}

/// An HTTP request with an optional JSON body.
///
/// # Example
///
/// ```rust
/// use bc_storefront::clients::{HttpRequest, HttpMethod};
/// use serde_json::json;
///
/// let request = HttpRequest::builder(HttpMethod::Post, "https://example.com/graphql")
///     .json_body(json!({"query": "{ site { settings { storeName } } }"}))
///     .header("Authorization", "Bearer abc")
///     .build()
///     .unwrap();
///
/// assert_eq!(request.extra_headers.get("Authorization").map(String::as_str), Some("Bearer abc"));
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The absolute URL for this request.
    pub url: String,
    /// The JSON request body, if any.
    pub body: Option<serde_json::Value>,
    /// Headers to send in addition to the client defaults.
    pub extra_headers: HashMap<String, String>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, url: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, url)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the URL is empty or a POST has
    /// no body.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.url.trim().is_empty() {
            return Err(InvalidHttpRequestError::MissingUrl);
        }
        if self.http_method == HttpMethod::Post && self.body.is_none() {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for [`HttpRequest`].
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    url: String,
    body: Option<serde_json::Value>,
    extra_headers: HashMap<String, String>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            http_method: method,
            url: url.into(),
            body: None,
            extra_headers: HashMap::new(),
        }
    }

    /// Sets the JSON request body.
    #[must_use]
    pub fn json_body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Adds a single header, replacing any previous value for the same name.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            url: self.url,
            body: self.body,
            extra_headers: self.extra_headers,
        };
        request.verify()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Post.to_string(), "post");
    }

    #[test]
    fn test_post_requires_body() {
        let result = HttpRequest::builder(HttpMethod::Post, "https://example.com").build();
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::MissingBody { .. })
        ));
    }

    #[test]
    fn test_empty_url_is_rejected() {
        let result = HttpRequest::builder(HttpMethod::Post, " ")
            .json_body(json!({}))
            .build();
        assert_eq!(result.unwrap_err(), InvalidHttpRequestError::MissingUrl);
    }

    #[test]
    fn test_post_with_body_is_valid() {
        let request = HttpRequest::builder(HttpMethod::Post, "https://example.com")
            .json_body(json!({"query": "{ a }"}))
            .build()
            .unwrap();
        assert_eq!(request.body, Some(json!({"query": "{ a }"})));
        assert!(request.extra_headers.is_empty());
    }

    #[test]
    fn test_header_replaces_previous_value() {
        let request = HttpRequest::builder(HttpMethod::Post, "https://example.com")
            .json_body(json!({}))
            .header("X-Auth-Client", "first")
            .header("X-Auth-Client", "second")
            .build()
            .unwrap();
        assert_eq!(
            request.extra_headers.get("X-Auth-Client").map(String::as_str),
            Some("second")
        );
    }
}
