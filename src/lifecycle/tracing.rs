//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`. Module paths are hidden (`with_target(false)`); the actor loop
//! tags its events with `entity_type` instead.
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: start, shutdown, and the final commit version
//! - **Cart actions**: the action, its outcome, and the version it committed
//! - **Client calls**: one span per call carrying `product_id`; the actor runs
//!   in its own task, so its events appear outside that span
//! - **Catalog and storage**: request URLs, snapshot sizes, unreadable snapshots
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info rocketshoes add 1
//! RUST_LOG=debug rocketshoes update 3 2
//! RUST_LOG=rocketshoes::catalog=debug rocketshoes list
//! ```
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Cart hydrated items=1 units=2
//! INFO Actor started entity_type="Cart"
//! INFO Committed entity_type="Cart" version=1
//! INFO Shutdown entity_type="Cart" version=1
//! ```
//!
//! **With `RUST_LOG=debug`** the same run also shows:
//!
//! ```text
//! DEBUG add_product: Sending request product_id=product_1
//! DEBUG Action entity_type="Cart" action=AddProduct(ProductId(1))
//! DEBUG Fetched product and stock product_id=product_1 stock=3
//! DEBUG Cart persisted items=1 bytes=143
//! ```
//!
//! A rejected action logs at `warn` with the error and leaves `version` unchanged.

/// Installs the global subscriber. Call once, before starting the store.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type and product_id identify the source instead
        .compact()
        .init();
}
