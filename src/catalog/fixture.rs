//! In-memory [`CatalogService`] for tests and offline demos.

use super::{CatalogError, CatalogService};
use crate::model::{Product, ProductId, StockRecord};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Inventory {
    products: BTreeMap<ProductId, Product>,
    stock: BTreeMap<ProductId, u32>,
    unavailable: Option<String>,
}

/// A fixed catalog held in memory.
///
/// Stock can be changed while a test runs, and the whole service can be taken
/// offline with [`StaticCatalog::set_unavailable`].
#[derive(Debug, Default)]
pub struct StaticCatalog {
    inventory: RwLock<Inventory>,
    requests: AtomicUsize,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `product` with `stock` units available.
    pub fn with_product(mut self, product: Product, stock: u32) -> Self {
        let inventory = self.inventory.get_mut();
        inventory.stock.insert(product.id, stock);
        inventory.products.insert(product.id, product);
        self
    }

    /// The six-shoe catalog served by the sample API.
    pub fn sample() -> Self {
        let shoes = [
            (1u32, "Tênis de Caminhada Leve Confortável", 17990, 3),
            (2, "Tênis VR Caminhada Confortável Detalhes Couro Masculino", 13990, 5),
            (3, "Tênis Adidas Duramo Lite 2.0", 21990, 2),
            (4, "Tênis VR Caminhada Confortável Detalhes Couro Masculino", 13990, 1),
            (5, "Tênis VR Caminhada Confortável Detalhes Couro Masculino", 13990, 5),
            (6, "Tênis Adidas Duramo Lite 2.0", 21990, 10),
        ];
        shoes
            .into_iter()
            .fold(Self::new(), |catalog, (id, title, cents, stock)| {
                let image = format!(
                    "https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis{id}.jpg"
                );
                catalog.with_product(
                    Product::new(id, title, Decimal::new(cents, 2), image),
                    stock,
                )
            })
    }

    pub async fn set_stock(&self, id: ProductId, amount: u32) {
        self.inventory.write().await.stock.insert(id, amount);
    }

    /// Makes every request fail with `Unavailable(reason)`; `None` restores service.
    pub async fn set_unavailable(&self, reason: Option<&str>) {
        self.inventory.write().await.unavailable = reason.map(str::to_string);
    }

    /// Number of requests served (including failed ones).
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    async fn read(&self) -> Result<tokio::sync::RwLockReadGuard<'_, Inventory>, CatalogError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let inventory = self.inventory.read().await;
        if let Some(reason) = inventory.unavailable.clone() {
            return Err(CatalogError::Unavailable(reason));
        }
        Ok(inventory)
    }
}

#[async_trait]
impl CatalogService for StaticCatalog {
    async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.read().await?.products.values().cloned().collect())
    }

    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.read()
            .await?
            .products
            .get(&id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    async fn stock(&self, id: ProductId) -> Result<StockRecord, CatalogError> {
        self.read()
            .await?
            .stock
            .get(&id)
            .map(|&amount| StockRecord { id, amount })
            .ok_or(CatalogError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookups_and_outage() {
        let catalog = StaticCatalog::sample();

        assert_eq!(catalog.products().await.unwrap().len(), 6);
        assert_eq!(catalog.stock(ProductId(3)).await.unwrap().amount, 2);
        assert!(matches!(
            catalog.product(ProductId(42)).await,
            Err(CatalogError::NotFound(ProductId(42)))
        ));

        catalog.set_stock(ProductId(3), 0).await;
        assert_eq!(catalog.stock(ProductId(3)).await.unwrap().amount, 0);

        catalog.set_unavailable(Some("maintenance")).await;
        assert!(matches!(
            catalog.products().await,
            Err(CatalogError::Unavailable(_))
        ));
        assert_eq!(catalog.request_count(), 5);
    }
}
