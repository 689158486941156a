use crate::catalog::CatalogService;
use crate::storage::LocalStorage;
use std::sync::Arc;

/// Dependencies injected into the cart actor when it starts running.
#[derive(Clone)]
pub struct CartContext {
    pub catalog: Arc<dyn CatalogService>,
    pub storage: Arc<dyn LocalStorage>,
}

impl CartContext {
    pub fn new(catalog: Arc<dyn CatalogService>, storage: Arc<dyn LocalStorage>) -> Self {
        Self { catalog, storage }
    }
}
