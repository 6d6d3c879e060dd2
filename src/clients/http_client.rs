//! HTTP client for BigCommerce API communication.
//!
//! This module provides the [`HttpClient`] type used for both the token
//! issuance endpoint and the storefront GraphQL endpoint.

use std::collections::HashMap;
use std::time::Instant;

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::StoreConfig;

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for requests to BigCommerce.
///
/// The client handles:
/// - Default headers (`User-Agent`, `Accept`)
/// - A per-request timeout taken from [`StoreConfig::request_timeout`]
/// - Status checking: any non-2xx response is returned as
///   [`HttpError::Response`] with the raw body
///
/// Requests are sent exactly once; there is no retry.
///
/// `HttpClient` is cheap to clone and `Send + Sync`.
///
/// # Example
///
/// ```rust,ignore
/// use bc_storefront::clients::{HttpClient, HttpRequest, HttpMethod};
///
/// let client = HttpClient::new(&config)?;
/// let request = HttpRequest::builder(HttpMethod::Post, config.graphql_endpoint())
///     .json_body(serde_json::json!({ "query": "{ site { settings { storeName } } }" }))
///     .header("Authorization", format!("Bearer {token}"))
///     .build()?;
/// let response = client.request(request).await?;
/// ```
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    default_headers: HashMap<String, String>,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given store configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the TLS backend cannot be initialized.
    pub fn new(config: &StoreConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}BigCommerce Storefront Library v{SDK_VERSION} | Rust {rust_version}"
        );

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            default_headers,
        })
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends a request and returns the response if it has a 2xx status.
    ///
    /// A JSON body sets `Content-Type: application/json` unless the request
    /// supplies its own.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - The connection fails or times out (`Network`)
    /// - A non-2xx response is received (`Response`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let mut headers = self.default_headers.clone();
        if request.body.is_some() {
            headers.insert(
                "Content-Type".to_string(),
                "application/json".to_string(),
            );
        }
        for (key, value) in &request.extra_headers {
            headers.retain(|existing, _| !existing.eq_ignore_ascii_case(key));
            headers.insert(key.clone(), value.clone());
        }

        let mut req_builder = match request.http_method {
            HttpMethod::Post => self.client.post(&request.url),
        };
        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }
        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        let started = Instant::now();
        let res = req_builder.send().await.map_err(|e| {
            tracing::warn!(
                method = %request.http_method,
                url = %request.url,
                timeout = e.is_timeout(),
                "Request failed before a response was received"
            );
            e
        })?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body = res.text().await?;
        let response = HttpResponse::new(code, res_headers, body);

        tracing::debug!(
            method = %request.http_method,
            url = %request.url,
            status = code,
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Request completed"
        );

        if response.is_ok() {
            return Ok(response);
        }

        Err(HttpError::Response(HttpResponseError {
            code,
            error_reference: response.request_id().map(String::from),
            message: response.body,
        }))
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClientId, ClientSecret};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> StoreConfig {
        StoreConfig::builder()
            .store_url("https://api.bigcommerce.com/stores/abc/v3/")
            .client_secret(ClientSecret::new("secret").unwrap())
            .client_id(ClientId::new("client").unwrap())
            .channel_id(1)
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap()
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(&test_config()).unwrap();
        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MyApp/1.0 | "));
        assert!(user_agent.contains("BigCommerce Storefront Library v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_accept_header_is_json() {
        let client = HttpClient::new(&test_config()).unwrap();
        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[tokio::test]
    async fn test_post_sends_json_body_and_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/echo"))
            .and(header("content-type", "application/json"))
            .and(header("x-custom", "yes"))
            .and(body_json(json!({"hello": "world"})))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new(&test_config()).unwrap();
        let request = HttpRequest::builder(HttpMethod::Post, format!("{}/echo", server.uri()))
            .json_body(json!({"hello": "world"}))
            .header("X-Custom", "yes")
            .build()
            .unwrap();

        let response = client.request(request).await.unwrap();
        assert_eq!(response.code, 200);
        assert_eq!(response.json().unwrap()["ok"], true);
    }

    #[tokio::test]
    async fn test_non_2xx_returns_response_error_with_raw_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(403)
                    .insert_header("X-Request-Id", "req-9")
                    .set_body_string("forbidden"),
            )
            .mount(&server)
            .await;

        let client = HttpClient::new(&test_config()).unwrap();
        let request = HttpRequest::builder(HttpMethod::Post, server.uri())
            .json_body(json!({}))
            .build()
            .unwrap();

        match client.request(request).await {
            Err(HttpError::Response(e)) => {
                assert_eq!(e.code, 403);
                assert_eq!(e.message, "forbidden");
                assert_eq!(e.error_reference.as_deref(), Some("req-9"));
            }
            other => panic!("Expected HttpError::Response, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_timeout_is_reported_as_network_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(2)))
            .mount(&server)
            .await;

        let config = StoreConfig::builder()
            .store_url("https://api.bigcommerce.com/stores/abc/v3/")
            .client_secret(ClientSecret::new("secret").unwrap())
            .client_id(ClientId::new("client").unwrap())
            .channel_id(1)
            .request_timeout(std::time::Duration::from_millis(100))
            .build()
            .unwrap();
        let client = HttpClient::new(&config).unwrap();
        let request = HttpRequest::builder(HttpMethod::Post, server.uri())
            .json_body(json!({}))
            .build()
            .unwrap();

        let error = client.request(request).await.unwrap_err();
        assert!(error.is_timeout());
    }
}
