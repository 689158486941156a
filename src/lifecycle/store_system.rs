use crate::cart_actor::CartContext;
use crate::catalog::{CatalogError, CatalogService, HttpCatalog};
use crate::clients::CartClient;
use crate::lifecycle::config::StoreConfig;
use crate::listing::ProductListingView;
use crate::storage::{load_cart, FileStorage, LocalStorage, StorageError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

/// Errors raised while bringing the store up or down.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Catalog client error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Could not read stored cart: {0}")]
    Storage(#[from] StorageError),

    #[error("Actor task failed: {0}")]
    ActorTask(String),
}

/// The runtime orchestrator for the storefront.
///
/// `StoreSystem` is responsible for:
/// - **Hydration**: reading the cart snapshot once, before the actor starts
/// - **Dependency Wiring**: handing the catalog and storage to the cart actor
/// - **Lifecycle Management**: spawning the actor and waiting for it on shutdown
///
/// # Example
///
/// ```ignore
/// let system = StoreSystem::start(catalog, storage, 32).await?;
///
/// system.cart_client.add_product(ProductId(1)).await?;
/// let mut listing = system.listing();
/// listing.load().await?;
///
/// drop(listing);
/// system.shutdown().await?;
/// ```
pub struct StoreSystem {
    /// Client for the cart actor
    pub cart_client: CartClient,

    catalog: Arc<dyn CatalogService>,

    /// Task handle for the cart actor (used for graceful shutdown)
    handle: tokio::task::JoinHandle<()>,
}

impl StoreSystem {
    /// Hydrates the cart from `storage` and starts the cart actor.
    pub async fn start(
        catalog: Arc<dyn CatalogService>,
        storage: Arc<dyn LocalStorage>,
        mailbox_size: usize,
    ) -> Result<Self, StartupError> {
        let initial = load_cart(storage.as_ref()).await?;
        info!(items = initial.len(), units = initial.total_units(), "Cart hydrated");

        let (cart_actor, cart_client) = crate::cart_actor::new(mailbox_size, initial);
        let context = CartContext::new(catalog.clone(), storage);
        let handle = tokio::spawn(cart_actor.run(context));

        Ok(Self {
            cart_client,
            catalog,
            handle,
        })
    }

    /// Starts against the HTTP catalog and file storage named by `config`.
    pub async fn from_config(config: &StoreConfig) -> Result<Self, StartupError> {
        let catalog = HttpCatalog::new(&config.api_url, config.request_timeout)?;
        let storage = FileStorage::new(&config.storage_dir);
        info!(api_url = %config.api_url, storage_dir = %config.storage_dir.display(), "Starting store");
        Self::start(Arc::new(catalog), Arc::new(storage), config.mailbox_size).await
    }

    /// A new listing view bound to this store's catalog and cart.
    pub fn listing(&self) -> ProductListingView {
        ProductListingView::new(self.catalog.clone(), self.cart_client.clone())
    }

    /// Gracefully shuts down the cart actor.
    ///
    /// The actor stops once every [`CartClient`] is gone, so listing views and
    /// client clones must be dropped before calling this.
    pub async fn shutdown(self) -> Result<(), StartupError> {
        info!("Shutting down store...");

        drop(self.cart_client);

        if let Err(e) = self.handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(StartupError::ActorTask(format!("{e:?}")));
        }

        info!("Store shutdown complete.");
        Ok(())
    }
}
