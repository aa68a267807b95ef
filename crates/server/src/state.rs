use crate::config::ServerConfig;
use crate::error::ServerResult;
use catalog::ProductCatalog;
use std::sync::Arc;
use store::DocumentStore;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Product catalog (shared across requests)
    pub catalog: Arc<ProductCatalog>,
}

impl ServerState {
    /// Open the configured document store and build state around it.
    ///
    /// Fails when the backing file exists but does not hold a valid document.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let store = Arc::new(DocumentStore::open(config.store_config()).map_err(catalog::CatalogError::from)?);
        Ok(Self::with_store(config, store))
    }

    /// Build state around an already open store.
    pub fn with_store(config: ServerConfig, store: Arc<DocumentStore>) -> Self {
        Self::with_catalog(config, ProductCatalog::new(store))
    }

    pub fn with_catalog(config: ServerConfig, catalog: ProductCatalog) -> Self {
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
        }
    }
}
