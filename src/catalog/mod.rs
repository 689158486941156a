//! The remote product and stock service.
//!
//! Stock is authoritative on the remote side and is fetched fresh by every
//! mutation that needs it; nothing here caches.

pub mod fixture;
pub mod http;

pub use fixture::StaticCatalog;
pub use http::HttpCatalog;

use crate::model::{Product, ProductId, StockRecord};
use async_trait::async_trait;
use thiserror::Error;

/// Errors raised while talking to the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The response body was not the expected JSON.
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// The service could not be reached at all.
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// Read-only access to products and their stock.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// `GET /products`
    async fn products(&self) -> Result<Vec<Product>, CatalogError>;

    /// `GET /products/{id}`
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError>;

    /// `GET /stock/{id}`
    async fn stock(&self, id: ProductId) -> Result<StockRecord, CatalogError>;
}
