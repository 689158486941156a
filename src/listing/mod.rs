//! The product listing: the catalog joined with live cart quantities.
//!
//! The view holds no business rules. It formats prices once on load, reads
//! quantities from the cart subscription on every call to
//! [`ProductListingView::entries`], and forwards add commands to the cart.

use crate::cart_actor::{CartError, LineChange};
use crate::catalog::{CatalogError, CatalogService};
use crate::clients::{ActorClient, CartClient};
use crate::framework::FrameworkError;
use crate::model::{format_price, Cart, Product, ProductId};
use std::fmt::Write;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, instrument};

/// One row of the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductEntry {
    pub id: ProductId,
    pub title: String,
    pub image: String,
    pub price_formatted: String,
    /// Units of this product in the cart; zero when absent.
    pub cart_quantity: u32,
}

#[derive(Debug, Clone)]
struct ListedProduct {
    product: Product,
    price_formatted: String,
}

pub struct ProductListingView {
    catalog: Arc<dyn CatalogService>,
    cart: CartClient,
    updates: watch::Receiver<Cart>,
    products: Vec<ListedProduct>,
}

impl ProductListingView {
    pub fn new(catalog: Arc<dyn CatalogService>, cart: CartClient) -> Self {
        let updates = cart.subscribe();
        Self {
            catalog,
            cart,
            updates,
            products: Vec::new(),
        }
    }

    /// Fetches the catalog and formats prices. Replaces any earlier load.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Result<usize, CatalogError> {
        let products = self.catalog.products().await?;
        self.products = products
            .into_iter()
            .map(|product| ListedProduct {
                price_formatted: format_price(product.price),
                product,
            })
            .collect();
        info!(count = self.products.len(), "Catalog loaded");
        Ok(self.products.len())
    }

    /// Current rows, in catalog order.
    pub fn entries(&self) -> Vec<ProductEntry> {
        let quantities = self.updates.borrow().quantities();
        self.products
            .iter()
            .map(|listed| ProductEntry {
                id: listed.product.id,
                title: listed.product.title.clone(),
                image: listed.product.image.clone(),
                price_formatted: listed.price_formatted.clone(),
                cart_quantity: quantities.get(&listed.product.id).copied().unwrap_or(0),
            })
            .collect()
    }

    /// Adds one unit of `id` to the cart.
    pub async fn add_to_cart(&self, id: ProductId) -> Result<LineChange, CartError> {
        self.cart.add_product(id).await
    }

    /// Waits for the next cart commit.
    pub async fn changed(&mut self) -> Result<(), FrameworkError> {
        self.updates
            .changed()
            .await
            .map_err(|_| FrameworkError::ActorClosed)
    }

    /// Plain-text rendering of [`entries`](Self::entries).
    pub fn render(&self) -> String {
        let cart_lines = self.updates.borrow().len();
        let mut out = format!("Meu carrinho: {cart_lines} itens\n");
        for entry in self.entries() {
            let _ = writeln!(
                out,
                "[{:>3}] {:<56} {:>14}  x{}",
                entry.id.0, entry.title, entry.price_formatted, entry.cart_quantity
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::framework::mock::MockClient;
    use crate::model::CartItem;
    use rust_decimal::Decimal;

    fn shoe(id: u32, cents: i64) -> Product {
        Product::new(id, format!("Shoe {id}"), Decimal::new(cents, 2), format!("{id}.jpg"))
    }

    fn catalog() -> Arc<StaticCatalog> {
        Arc::new(
            StaticCatalog::new()
                .with_product(shoe(1, 17990), 3)
                .with_product(shoe(2, 13990), 5)
                .with_product(shoe(3, 123456), 1),
        )
    }

    #[tokio::test]
    async fn test_entries_join_cart_quantities() {
        let initial = Cart::from_items(vec![CartItem::new(shoe(2, 13990), 4)]);
        let mock = MockClient::new(initial);
        let mut view = ProductListingView::new(catalog(), CartClient::new(mock.client()));

        assert_eq!(view.load().await.unwrap(), 3);
        let entries = view.entries();

        let quantities: Vec<_> = entries.iter().map(|e| (e.id.0, e.cart_quantity)).collect();
        assert_eq!(quantities, vec![(1, 0), (2, 4), (3, 0)]);
        assert_eq!(entries[0].price_formatted, "R$ 179,90");
        assert_eq!(entries[2].price_formatted, "R$ 1.234,56");
        assert_eq!(entries[1].image, "2.jpg");
    }

    #[tokio::test]
    async fn test_add_delegates_and_rerenders_on_commit() {
        let mut mock = MockClient::new(Cart::new());
        mock.expect_action().return_ok(LineChange {
            product_id: ProductId(1),
            amount: 1,
        });
        let mut view = ProductListingView::new(catalog(), CartClient::new(mock.client()));
        view.load().await.unwrap();

        let change = view.add_to_cart(ProductId(1)).await.unwrap();
        assert_eq!(change.amount, 1);

        mock.publish(Cart::from_items(vec![CartItem::new(shoe(1, 17990), 1)]));
        view.changed().await.unwrap();

        assert_eq!(view.entries()[0].cart_quantity, 1);
        let rendered = view.render();
        assert!(rendered.starts_with("Meu carrinho: 1 itens\n"));
        assert!(rendered.contains("Shoe 1"));
        assert!(rendered.contains("x1"));
        mock.verify();
    }

    #[tokio::test]
    async fn test_load_failure_keeps_previous_rows() {
        let catalog = catalog();
        let mock = MockClient::new(Cart::new());
        let mut view = ProductListingView::new(catalog.clone(), CartClient::new(mock.client()));
        view.load().await.unwrap();

        catalog.set_unavailable(Some("offline")).await;
        assert!(matches!(view.load().await, Err(CatalogError::Unavailable(_))));
        assert_eq!(view.entries().len(), 3);
    }
}
