//! Storefront catalog queries.
//!
//! - [`CatalogClient`]: sends authorized GraphQL documents to the storefront
//! - [`PAGINATE_PRODUCTS_QUERY`]: the first page of products
//! - [`render_preformatted`]: HTML `<pre>` rendering of a query result

mod client;
mod errors;
mod query;

pub use client::{render_preformatted, CatalogClient};
pub use errors::QueryError;
pub use query::PAGINATE_PRODUCTS_QUERY;
