//! Catalog reference data.
//!
//! [`Product`] and [`StockRecord`] are read-only copies of what the remote
//! catalog returns; the cart never mutates them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Products.
///
/// Serialises as the bare integer the catalog uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

/// A product as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image: String,
}

impl Product {
    /// Creates a new Product instance.
    ///
    /// # Arguments
    /// * `id` - Catalog identifier
    /// * `title` - Display title
    /// * `price` - Unit price
    /// * `image` - Image URL
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        price: Decimal,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            image: image.into(),
        }
    }
}

/// Units of a product currently available, as reported by `GET /stock/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    pub id: ProductId,
    pub amount: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_parses_catalog_json() {
        let raw = r#"{
            "id": 1,
            "title": "Tênis de Caminhada Leve Confortável",
            "price": 179.9,
            "image": "https://example.com/shoe.jpg"
        }"#;
        let product: Product = serde_json::from_str(raw).unwrap();

        assert_eq!(product.id, ProductId(1));
        assert_eq!(product.price, Decimal::new(1799, 1));
        assert_eq!(product.image, "https://example.com/shoe.jpg");
    }

    #[test]
    fn test_integer_price_and_stock_record() {
        let product: Product =
            serde_json::from_str(r#"{"id": 2, "title": "Boot", "price": 200, "image": ""}"#).unwrap();
        assert_eq!(product.price, Decimal::new(200, 0));

        let stock: StockRecord = serde_json::from_str(r#"{"id": 2, "amount": 5}"#).unwrap();
        assert_eq!(stock, StockRecord { id: ProductId(2), amount: 5 });
    }

    #[test]
    fn test_product_id_display() {
        assert_eq!(ProductId(7).to_string(), "product_7");
    }
}
