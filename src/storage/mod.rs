//! Client-local key/value storage and the cart snapshot kept in it.
//!
//! The cart is persisted as one JSON array under [`CART_STORAGE_KEY`], written
//! wholesale after every committed mutation and read once at startup.

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::model::{Cart, CartItem, Product, ProductId};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Key under which the cart snapshot is stored.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A string key/value store, modelled on browser local storage.
#[async_trait]
pub trait LocalStorage: Send + Sync {
    /// Returns the stored value, or `None` when the key was never written.
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrites the value stored under `key`.
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// A snapshot line as written, before amounts are validated.
///
/// Older writers could leave zero or negative amounts behind.
#[derive(Debug, Deserialize)]
struct StoredItem {
    id: ProductId,
    title: String,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    image: String,
    amount: i64,
}

impl StoredItem {
    fn into_cart_item(self) -> Option<CartItem> {
        let amount = u32::try_from(self.amount).ok().filter(|&amount| amount > 0)?;
        let product = Product::new(self.id, self.title, self.price, self.image);
        Some(CartItem::new(product, amount))
    }
}

/// Reads the cart snapshot.
///
/// A missing key yields an empty cart. So does a snapshot that no longer
/// parses; that case is logged and the bad value is left in place until the
/// next successful mutation overwrites it. Lines whose amount is not a
/// positive `u32` are dropped one by one and the rest are kept.
pub async fn load_cart(storage: &dyn LocalStorage) -> Result<Cart, StorageError> {
    let Some(raw) = storage.get_item(CART_STORAGE_KEY).await? else {
        debug!("No stored cart");
        return Ok(Cart::new());
    };

    let stored = match serde_json::from_str::<Vec<StoredItem>>(&raw) {
        Ok(stored) => stored,
        Err(e) => {
            warn!(error = %e, "Stored cart is unreadable, starting empty");
            return Ok(Cart::new());
        }
    };

    let items = stored.into_iter().filter_map(|line| {
        let (product_id, amount) = (line.id, line.amount);
        let item = line.into_cart_item();
        if item.is_none() {
            warn!(%product_id, amount, "Dropping stored line with invalid amount");
        }
        item
    });
    Ok(Cart::from_items(items))
}

/// Writes `cart` as the new snapshot.
pub async fn save_cart(storage: &dyn LocalStorage, cart: &Cart) -> Result<(), StorageError> {
    let raw = serde_json::to_string(cart)?;
    storage.set_item(CART_STORAGE_KEY, &raw).await?;
    debug!(items = cart.len(), bytes = raw.len(), "Cart persisted");
    Ok(())
}
