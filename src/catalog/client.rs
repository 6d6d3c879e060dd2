//! Storefront GraphQL client.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use bc_storefront::{CatalogClient, CredentialManager};
//!
//! let credentials = Arc::new(CredentialManager::connect(config, store).await?);
//! let catalog = CatalogClient::new(credentials);
//!
//! let page = catalog.fetch_catalog_page().await?;
//! println!("{}", page["data"]["site"]["products"]["pageInfo"]["endCursor"]);
//! ```

use std::sync::Arc;

use serde_json::json;

use crate::auth::CredentialManager;
use crate::catalog::query::PAGINATE_PRODUCTS_QUERY;
use crate::catalog::QueryError;
use crate::clients::{HttpClient, HttpError, HttpMethod, HttpRequest};

/// Runs storefront GraphQL queries authorized by a [`CredentialManager`].
///
/// The token is requested from the manager for every query, so a token
/// replaced in the manager is picked up by the next query.
///
/// `CatalogClient` is `Send + Sync`.
#[derive(Debug)]
pub struct CatalogClient {
    credentials: Arc<CredentialManager>,
    http_client: HttpClient,
    endpoint: String,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CatalogClient>();
};

impl CatalogClient {
    /// Creates a client for the store configured in `credentials`, sharing
    /// its HTTP client.
    #[must_use]
    pub fn new(credentials: Arc<CredentialManager>) -> Self {
        let endpoint = credentials.config().graphql_endpoint();
        let http_client = credentials.http_client().clone();
        Self {
            credentials,
            http_client,
            endpoint,
        }
    }

    /// Returns the GraphQL URL queries are sent to.
    #[must_use]
    pub fn graphql_endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the credential manager authorizing this client.
    #[must_use]
    pub const fn credentials(&self) -> &Arc<CredentialManager> {
        &self.credentials
    }

    /// Fetches the first page of products.
    ///
    /// # Errors
    ///
    /// See [`query`](Self::query).
    pub async fn fetch_catalog_page(&self) -> Result<serde_json::Value, QueryError> {
        self.query(PAGINATE_PRODUCTS_QUERY).await
    }

    /// Fetches the first page of products and renders it as preformatted
    /// text.
    ///
    /// # Errors
    ///
    /// See [`query`](Self::query).
    pub async fn render_catalog_page(&self) -> Result<String, QueryError> {
        let page = self.fetch_catalog_page().await?;
        Ok(render_preformatted(&page))
    }

    /// Sends a GraphQL document and returns the decoded JSON response.
    ///
    /// The request is sent once, with `Authorization: Bearer <token>`.
    ///
    /// # Errors
    ///
    /// - [`QueryError::Token`] if no token could be obtained
    /// - [`QueryError::Failed`] for a non-2xx response
    /// - [`QueryError::MalformedResponse`] if the body is not JSON
    /// - [`QueryError::Http`] for network errors and timeouts
    pub async fn query(&self, document: &str) -> Result<serde_json::Value, QueryError> {
        let token = self.credentials.get_token().await?;

        let request = HttpRequest::builder(HttpMethod::Post, self.endpoint.as_str())
            .json_body(json!({ "query": document }))
            .header("Authorization", token.authorization_header())
            .build()
            .map_err(HttpError::from)?;

        let response = match self.http_client.request(request).await {
            Ok(response) => response,
            Err(HttpError::Response(e)) => {
                tracing::warn!(status = e.code, "Storefront query was rejected");
                return Err(QueryError::Failed {
                    status: e.code,
                    body: e.message,
                });
            }
            Err(e) => return Err(e.into()),
        };

        let value = response
            .json()
            .map_err(|_| QueryError::MalformedResponse {
                status: response.code,
                body: response.body.clone(),
            })?;

        if let Some(errors) = value.get("errors") {
            tracing::warn!(%errors, "Storefront query returned GraphQL errors");
        }

        Ok(value)
    }
}

/// Renders a JSON value as pretty-printed text inside a `<pre>` block.
///
/// `&`, `<` and `>` are escaped so the output can be embedded in HTML.
///
/// ```rust
/// use bc_storefront::catalog::render_preformatted;
/// use serde_json::json;
///
/// let html = render_preformatted(&json!({"name": "<b>"}));
/// assert!(html.starts_with("<pre>"));
/// assert!(html.contains("&lt;b&gt;"));
/// assert!(html.ends_with("</pre>"));
/// ```
#[must_use]
pub fn render_preformatted(value: &serde_json::Value) -> String {
    let pretty = format!("{value:#}");
    let mut output = String::with_capacity(pretty.len() + 11);
    output.push_str("<pre>");
    for c in pretty.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(c),
        }
    }
    output.push_str("</pre>");
    output
}
