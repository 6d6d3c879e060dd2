//! HTTP response type.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

/// A response received from the platform.
///
/// The body is kept as raw text; decoding is left to the caller so that a
/// malformed body can be reported together with its status.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use bc_storefront::clients::HttpResponse;
///
/// let response = HttpResponse::new(200, HashMap::new(), r#"{"data":{}}"#.to_string());
/// assert!(response.is_ok());
/// assert!(response.json().unwrap()["data"].is_object());
/// ```
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name.
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a new response. Header names are normalized to lowercase.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: String) -> Self {
        let headers = headers
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` for 2xx status codes.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of the named header.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }

    /// Decodes the body as an untyped JSON value.
    ///
    /// # Errors
    ///
    /// Returns the decoding error if the body is not valid JSON.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    /// Decodes the body into `T`.
    ///
    /// # Errors
    ///
    /// Returns the decoding error if the body does not match `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_ok_for_2xx_only() {
        assert!(HttpResponse::new(200, HashMap::new(), String::new()).is_ok());
        assert!(HttpResponse::new(204, HashMap::new(), String::new()).is_ok());
        assert!(!HttpResponse::new(301, HashMap::new(), String::new()).is_ok());
        assert!(!HttpResponse::new(422, HashMap::new(), String::new()).is_ok());
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("X-Request-Id".to_string(), vec!["req-1".to_string()]);
        let response = HttpResponse::new(200, headers, String::new());

        assert_eq!(response.request_id(), Some("req-1"));
        assert_eq!(response.header("X-REQUEST-ID"), Some("req-1"));
    }

    #[test]
    fn test_json_reports_malformed_body() {
        let response = HttpResponse::new(200, HashMap::new(), "<html>".to_string());
        assert!(response.json().is_err());
    }

    #[test]
    fn test_deserialize_into_typed_value() {
        #[derive(serde::Deserialize)]
        struct Body {
            count: u32,
        }
        let response = HttpResponse::new(200, HashMap::new(), r#"{"count":3}"#.to_string());
        assert_eq!(response.deserialize::<Body>().unwrap().count, 3);
    }
}
