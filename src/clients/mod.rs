//! HTTP transport for BigCommerce API communication.
//!
//! # Overview
//!
//! - [`HttpClient`]: async client with default headers and a request timeout
//! - [`HttpRequest`]: a request to an absolute URL with an optional JSON body
//! - [`HttpResponse`]: status, headers, and raw body of a 2xx response
//! - [`HttpMethod`]: supported HTTP methods
//! - [`HttpError`]: transport error type
//!
//! The token manager and the catalog client both send their requests
//! through a single shared [`HttpClient`].

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
