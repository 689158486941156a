//! Mutations accepted by the cart actor.
//!
//! These are handled by [`ActorState::handle_action`](crate::framework::ActorState::handle_action)
//! on [`Cart`](crate::model::Cart); see [`entity`](super::entity).

use crate::model::ProductId;

/// Cart mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Adds one unit, stock permitting.
    AddProduct(ProductId),
    /// Takes one unit off; the line disappears when it reaches zero.
    RemoveProduct(ProductId),
    /// Sets the amount of a line already in the cart.
    ///
    /// Signed so that non-positive requests reach validation instead of being
    /// unrepresentable at the call site.
    UpdateProductAmount { product_id: ProductId, amount: i64 },
}

/// Result of every cart action: the line's amount after the commit.
///
/// `amount == 0` means the line was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineChange {
    pub product_id: ProductId,
    pub amount: u32,
}
