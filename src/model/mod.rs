//! Plain data: catalog records, the cart value, and price formatting.

pub mod cart;
pub mod price;
pub mod product;

pub use cart::*;
pub use price::*;
pub use product::*;
