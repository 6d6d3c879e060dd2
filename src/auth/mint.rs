//! Storefront token issuance.
//!
//! Storefront GraphQL requests are authorized with a JWT minted by the
//! management API:
//!
//! ```text
//! POST https://api.bigcommerce.com/stores/{store_hash}/v3/storefront/api-token
//! X-Auth-Token: <access token>
//! X-Auth-Client: <client id>
//!
//! {"channel_id": 1, "expires_at": 1885635176, "allowed_cors_origins": ["https://example.com"]}
//! ```
//!
//! The response is `{"data": {"token": "..."}}`.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::{BearerToken, TokenMintError};
use crate::clients::{HttpClient, HttpError, HttpMethod, HttpRequest};
use crate::config::{HostUrl, StoreConfig};

/// Header carrying the API account access token.
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// Header carrying the API account client ID.
pub const AUTH_CLIENT_HEADER: &str = "X-Auth-Client";

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    channel_id: u64,
    expires_at: i64,
    allowed_cors_origins: Vec<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    data: Option<TokenData>,
}

#[derive(Debug, Deserialize)]
struct TokenData {
    token: Option<String>,
}

/// Mints a new storefront token with a single POST to the token endpoint.
///
/// The requested expiry is now plus [`StoreConfig::token_lifetime`]; the
/// returned token records it. The allowed CORS origins contain the origin
/// of [`StoreConfig::home_url`] when one is configured.
///
/// This function does not persist the token; see
/// [`CredentialManager::get_token`](crate::CredentialManager::get_token).
///
/// # Errors
///
/// - [`TokenMintError::Rejected`] for a non-2xx response
/// - [`TokenMintError::MalformedResponse`] if the body is not JSON or
///   `data.token` is missing, empty, or not a string
/// - [`TokenMintError::Http`] for network errors and timeouts
pub async fn mint_token(
    http_client: &HttpClient,
    config: &StoreConfig,
) -> Result<BearerToken, TokenMintError> {
    if config.store_hash().is_empty() {
        tracing::warn!("Minting a storefront token with an empty store hash");
    }

    let lifetime = Duration::from_std(config.token_lifetime())
        .unwrap_or_else(|_| Duration::seconds(i64::MAX / 1_000));
    let expires_at = Utc::now()
        .checked_add_signed(lifetime)
        .unwrap_or(chrono::DateTime::<Utc>::MAX_UTC);

    let request_body = TokenRequest {
        channel_id: config.channel_id(),
        expires_at: expires_at.timestamp(),
        allowed_cors_origins: config.home_url().map(HostUrl::origin).into_iter().collect(),
    };
    let body = serde_json::to_value(&request_body)?;

    let request = HttpRequest::builder(HttpMethod::Post, config.token_endpoint())
        .json_body(body)
        .header(AUTH_TOKEN_HEADER, config.client_secret().as_ref())
        .header(AUTH_CLIENT_HEADER, config.client_id().as_ref())
        .build()
        .map_err(HttpError::from)?;

    let response = match http_client.request(request).await {
        Ok(response) => response,
        Err(HttpError::Response(e)) => {
            tracing::warn!(status = e.code, "Storefront token request was rejected");
            return Err(TokenMintError::Rejected {
                status: e.code,
                message: e.message,
            });
        }
        Err(e) => return Err(e.into()),
    };

    let status = response.code;
    let parsed: TokenResponse =
        response
            .deserialize()
            .map_err(|e| TokenMintError::MalformedResponse {
                status,
                reason: format!("Failed to parse token response: {e}"),
            })?;

    let value = parsed
        .data
        .and_then(|data| data.token)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| TokenMintError::MalformedResponse {
            status,
            reason: "response has no data.token".to_string(),
        })?;

    tracing::info!(
        channel_id = config.channel_id(),
        expires_at = %expires_at,
        "Minted storefront token"
    );

    Ok(BearerToken::new(value, Some(expires_at)))
}
