//! reqwest-backed [`CatalogService`].

use super::{CatalogError, CatalogService};
use crate::model::{Product, ProductId, StockRecord};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

/// Client for the JSON product API.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalog {
    /// Builds a client rooted at `base_url` (trailing slashes are ignored).
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// GETs `path` and decodes the body. A 404 becomes `NotFound(missing)` when
    /// the request was for a single record.
    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        missing: Option<ProductId>,
    ) -> Result<T, CatalogError> {
        let url = self.url(path);
        debug!(%url, "GET");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_connect() {
                CatalogError::Unavailable(e.to_string())
            } else {
                CatalogError::Http(e)
            }
        })?;
        let status = response.status();

        if let (StatusCode::NOT_FOUND, Some(id)) = (status, missing) {
            return Err(CatalogError::NotFound(id));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }
}

#[async_trait]
impl CatalogService for HttpCatalog {
    #[instrument(skip(self))]
    async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        self.fetch("products", None).await
    }

    #[instrument(skip_all, fields(product_id = %id))]
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.fetch(&format!("products/{}", id.0), Some(id)).await
    }

    #[instrument(skip_all, fields(product_id = %id))]
    async fn stock(&self, id: ProductId) -> Result<StockRecord, CatalogError> {
        self.fetch(&format!("stock/{}", id.0), Some(id)).await
    }
}
