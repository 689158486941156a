//! [`ActorState`] implementation for [`Cart`].
//!
//! Each action runs against the actor's working copy. Stock is fetched fresh
//! from the catalog on every add and update. Persistence happens in
//! [`ActorState::on_commit`], so a failed write discards the whole mutation.

use super::actions::{CartAction, LineChange};
use super::context::CartContext;
use super::error::CartError;
use crate::framework::ActorState;
use crate::model::{Cart, CartItem, ProductId};
use crate::storage::save_cart;
use async_trait::async_trait;
use tracing::debug;

#[async_trait]
impl ActorState for Cart {
    type Action = CartAction;
    type ActionResult = LineChange;
    type Context = CartContext;
    type Error = CartError;

    async fn handle_action(
        &mut self,
        action: CartAction,
        ctx: &CartContext,
    ) -> Result<LineChange, CartError> {
        match action {
            CartAction::AddProduct(product_id) => self.add_product(product_id, ctx).await,
            CartAction::RemoveProduct(product_id) => self.remove_product(product_id),
            CartAction::UpdateProductAmount { product_id, amount } => {
                self.update_product_amount(product_id, amount, ctx).await
            }
        }
    }

    async fn on_commit(&self, ctx: &CartContext) -> Result<(), CartError> {
        save_cart(ctx.storage.as_ref(), self).await?;
        Ok(())
    }
}

impl Cart {
    async fn add_product(
        &mut self,
        product_id: ProductId,
        ctx: &CartContext,
    ) -> Result<LineChange, CartError> {
        let (product, stock) = tokio::try_join!(
            ctx.catalog.product(product_id),
            ctx.catalog.stock(product_id)
        )?;
        debug!(%product_id, stock = stock.amount, "Fetched product and stock");

        let requested = self.amount_of(product_id).saturating_add(1);
        if requested > stock.amount {
            return Err(CartError::OutOfStock {
                product_id,
                requested,
                available: stock.amount,
            });
        }

        match self.get_mut(product_id) {
            Some(line) => line.amount = requested,
            None => self.push(CartItem::new(product, 1)),
        }

        Ok(LineChange {
            product_id,
            amount: requested,
        })
    }

    fn remove_product(&mut self, product_id: ProductId) -> Result<LineChange, CartError> {
        let amount = self
            .decrement(product_id)
            .ok_or(CartError::NotInCart(product_id))?;
        Ok(LineChange { product_id, amount })
    }

    async fn update_product_amount(
        &mut self,
        product_id: ProductId,
        amount: i64,
        ctx: &CartContext,
    ) -> Result<LineChange, CartError> {
        // Stock is fetched before any other check, so an outage always reads as a failed update.
        let stock = ctx.catalog.stock(product_id).await?;
        debug!(%product_id, stock = stock.amount, "Fetched stock");

        if self.get(product_id).is_none() {
            return Err(CartError::NotInCart(product_id));
        }
        let requested = match u32::try_from(amount) {
            Ok(requested) if requested > 0 => requested,
            _ => return Err(CartError::InvalidAmount { product_id, amount }),
        };
        if requested > stock.amount {
            return Err(CartError::OutOfStock {
                product_id,
                requested,
                available: stock.amount,
            });
        }

        let line = self
            .get_mut(product_id)
            .ok_or(CartError::NotInCart(product_id))?;
        line.amount = requested;

        Ok(LineChange {
            product_id,
            amount: requested,
        })
    }
}
