//! Error types for the cart actor, and the user-facing notices they map to.

use crate::catalog::CatalogError;
use crate::framework::FrameworkError;
use crate::model::ProductId;
use crate::storage::StorageError;
use std::fmt::Display;
use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The requested amount exceeds the stock reported by the catalog.
    #[error("Out of stock for {product_id}: requested {requested}, available {available}")]
    OutOfStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// An update asked for zero or a negative amount.
    #[error("Invalid amount for {product_id}: {amount}")]
    InvalidAmount { product_id: ProductId, amount: i64 },

    #[error("Not in cart: {0}")]
    NotInCart(ProductId),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// An error occurred while communicating with the actor.
    #[error("Actor communication error: {0}")]
    Framework(#[from] FrameworkError),
}

/// The cart operation a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
    Add,
    Remove,
    Update,
}

/// The user-facing failure signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    OutOfStock,
    AddFailed,
    RemoveFailed,
    UpdateFailed,
}

impl Notice {
    /// Picks the notice to show for a failed `operation`.
    ///
    /// Stock and amount rejections read as "out of stock" regardless of the
    /// operation; everything else is reported as the operation's own failure.
    pub fn for_failure(operation: CartOperation, error: &CartError) -> Self {
        match (operation, error) {
            (_, CartError::OutOfStock { .. } | CartError::InvalidAmount { .. }) => Notice::OutOfStock,
            (CartOperation::Add, _) => Notice::AddFailed,
            (CartOperation::Remove, _) => Notice::RemoveFailed,
            (CartOperation::Update, _) => Notice::UpdateFailed,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Notice::OutOfStock => "Quantidade solicitada fora de estoque",
            Notice::AddFailed => "Erro na adição do produto",
            Notice::RemoveFailed => "Erro na remoção do produto",
            Notice::UpdateFailed => "Erro na alteração de quantidade do produto",
        }
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}
