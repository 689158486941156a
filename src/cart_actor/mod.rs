//! The cart manager: a single actor that owns the [`Cart`].
//!
//! All mutations are queued through the actor's mailbox, so overlapping calls
//! are applied one after another against the latest committed cart.

mod actions;
mod context;
pub mod entity;
pub mod error;

pub use actions::*;
pub use context::*;
pub use error::*;

use crate::clients::CartClient;
use crate::framework::StateActor;
use crate::model::Cart;

/// Creates the cart actor holding `initial` and its client.
///
/// The actor does nothing until [`StateActor::run`] is given a [`CartContext`].
pub fn new(buffer_size: usize, initial: Cart) -> (StateActor<Cart>, CartClient) {
    let (actor, generic_client) = StateActor::new(buffer_size, initial);
    let client = CartClient::new(generic_client);

    (actor, client)
}
