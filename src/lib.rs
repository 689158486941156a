//! # RocketShoes
//!
//! > **Shopping-cart state for a small shoe storefront.**
//!
//! The cart lives inside a single Tokio task (an actor). Every add, remove, and
//! update is queued through its mailbox, checked against live stock from the
//! product API, written to client-local storage, and only then published to
//! subscribers such as the product listing.
//!
//! ## Architecture Notes
//!
//! ### 1. Single Writer
//! [`StateActor`](framework::StateActor) applies actions one at a time on a
//! working copy of the [`Cart`](model::Cart). Overlapping calls see each other's
//! results, so two quick adds can never both pass the same stock check.
//!
//! ### 2. Commit Then Publish
//! The working copy is persisted in the `on_commit` hook. If the catalog or the
//! storage write fails, the copy is thrown away and subscribers keep the last
//! committed cart.
//!
//! ### 3. Async Context Injection
//! The catalog and storage are injected when the actor starts running
//! ([`CartContext`](cart_actor::CartContext)), not when it is constructed.
//!
//! ### 4. Observability
//! `tracing` everywhere with structured fields; see [`lifecycle::tracing`].
//!
//! ## Module Tour
//!
//! - [`framework`]: the generic actor, its client, and the test mocks.
//! - [`model`]: products, stock records, the cart, and price formatting.
//! - [`cart_actor`]: the cart's actions, errors, and user-facing notices.
//! - [`clients`]: [`CartClient`](clients::CartClient), the typed handle to the actor.
//! - [`catalog`]: the product/stock service (HTTP and in-memory).
//! - [`storage`]: local key/value storage and the cart snapshot.
//! - [`listing`]: the product listing joined with cart quantities.
//! - [`lifecycle`]: configuration, startup/shutdown, and tracing setup.
//!
//! ### Running
//!
//! ```bash
//! RUST_LOG=info cargo run -- --offline add 1
//! cargo test
//! ```

pub mod cart_actor;
pub mod catalog;
pub mod clients;
pub mod framework;
pub mod lifecycle;
pub mod listing;
pub mod model;
pub mod storage;
