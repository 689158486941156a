//! The cart value owned by the cart actor.
//!
//! A [`Cart`] is an ordered list of [`CartItem`]s, unique by product id. It
//! serialises as a plain JSON array, which is exactly the snapshot written to
//! local storage.

use crate::model::{Product, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A product line in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image: String,
    pub amount: u32,
}

impl CartItem {
    pub fn new(product: Product, amount: u32) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            image: product.image,
            amount,
        }
    }

    /// Unit price times amount.
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.amount)
    }
}

/// Ordered, unique-by-id collection of cart lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from raw lines, keeping the first line per product id and
    /// dropping lines with a zero amount.
    pub fn from_items(items: impl IntoIterator<Item = CartItem>) -> Self {
        let mut seen = HashSet::new();
        let items = items
            .into_iter()
            .filter(|item| item.amount > 0 && seen.insert(item.id))
            .collect();
        Self { items }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct product lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Amount of `id` in the cart, zero when absent.
    pub fn amount_of(&self, id: ProductId) -> u32 {
        self.get(id).map_or(0, |item| item.amount)
    }

    /// Product id to amount, for joining with the catalog.
    pub fn quantities(&self) -> HashMap<ProductId, u32> {
        self.items.iter().map(|item| (item.id, item.amount)).collect()
    }

    /// Sum of amounts across all lines.
    pub fn total_units(&self) -> u32 {
        self.items.iter().map(|item| item.amount).sum()
    }

    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    pub(crate) fn get_mut(&mut self, id: ProductId) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    pub(crate) fn push(&mut self, item: CartItem) {
        debug_assert!(self.get(item.id).is_none());
        self.items.push(item);
    }

    /// Takes one unit of `id` off the cart, dropping the line once it reaches zero.
    /// Returns the remaining amount, or `None` when `id` is not in the cart.
    pub(crate) fn decrement(&mut self, id: ProductId) -> Option<u32> {
        let index = self.items.iter().position(|item| item.id == id)?;
        let remaining = self.items[index].amount.saturating_sub(1);
        if remaining == 0 {
            self.items.remove(index);
        } else {
            self.items[index].amount = remaining;
        }
        Some(remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u32, price: i64, amount: u32) -> CartItem {
        CartItem::new(
            Product::new(id, format!("Shoe {id}"), Decimal::new(price, 2), ""),
            amount,
        )
    }

    #[test]
    fn test_from_items_drops_duplicates_and_empty_lines() {
        let cart = Cart::from_items(vec![item(1, 1000, 2), item(2, 500, 0), item(1, 1000, 9), item(3, 100, 1)]);

        let ids: Vec<_> = cart.items().iter().map(|i| (i.id.0, i.amount)).collect();
        assert_eq!(ids, vec![(1, 2), (3, 1)]);
    }

    #[test]
    fn test_totals_and_quantities() {
        let cart = Cart::from_items(vec![item(1, 17990, 2), item(2, 13990, 1)]);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total_units(), 3);
        assert_eq!(cart.total(), Decimal::new(49970, 2));
        assert_eq!(cart.quantities().get(&ProductId(2)), Some(&1));
        assert_eq!(cart.amount_of(ProductId(9)), 0);
    }

    #[test]
    fn test_decrement_removes_line_at_zero() {
        let mut cart = Cart::from_items(vec![item(1, 100, 2), item(2, 100, 1)]);

        assert_eq!(cart.decrement(ProductId(1)), Some(1));
        assert_eq!(cart.decrement(ProductId(2)), Some(0));
        assert!(cart.get(ProductId(2)).is_none());
        assert_eq!(cart.decrement(ProductId(5)), None);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_snapshot_is_a_plain_array() {
        let cart = Cart::from_items(vec![item(3, 1999, 2)]);
        let json = serde_json::to_value(&cart).unwrap();

        assert_eq!(
            json,
            serde_json::json!([{
                "id": 3,
                "title": "Shoe 3",
                "price": 19.99,
                "image": "",
                "amount": 2
            }])
        );
    }

    #[test]
    fn test_snapshot_reload_preserves_order() {
        let cart = Cart::from_items(vec![item(5, 100, 1), item(2, 200, 4), item(9, 300, 2)]);
        let raw = serde_json::to_string(&cart).unwrap();
        let reloaded: Cart = serde_json::from_str(&raw).unwrap();

        let pairs = |c: &Cart| c.items().iter().map(|i| (i.id, i.amount)).collect::<Vec<_>>();
        assert_eq!(pairs(&reloaded), pairs(&cart));
    }
}
