//! Product operations on top of the document store.

use crate::id::{IdGenerator, RandomIds};
use crate::product::Product;
use serde_json::Value;
use std::sync::Arc;
use store::{DocumentStore, Record, StoreError};
use thiserror::Error;

/// Collection that holds products.
pub const PRODUCTS: &str = "products";

/// Fresh ids tried before giving up on a create.
const MAX_ID_ATTEMPTS: usize = 16;

/// Errors raised by catalog mutations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Could not generate a unique id after {attempts} attempts")]
    IdGeneration { attempts: usize },
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Parse a request body into product fields. The body must be a JSON object;
/// an empty body reads as no fields.
pub fn parse_body(bytes: &[u8]) -> CatalogResult<Record> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Record::new());
    }
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| CatalogError::InvalidBody(e.to_string()))?;
    match value {
        Value::Object(fields) => Ok(fields),
        _ => Err(CatalogError::InvalidBody(
            "expected a JSON object".to_string(),
        )),
    }
}

/// CRUD over the `products` collection.
///
/// The catalog never touches the disk itself; every write goes through the
/// shared [`DocumentStore`].
pub struct ProductCatalog {
    store: Arc<DocumentStore>,
    ids: Box<dyn IdGenerator>,
}

impl ProductCatalog {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self::with_id_generator(store, Box::new(RandomIds::default()))
    }

    /// Use a custom id source (e.g. deterministic ids in tests).
    pub fn with_id_generator(store: Arc<DocumentStore>, ids: Box<dyn IdGenerator>) -> Self {
        Self { store, ids }
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// All products in creation order.
    pub fn list(&self) -> CatalogResult<Vec<Product>> {
        Ok(self
            .store
            .collection(PRODUCTS)?
            .into_iter()
            .map(Product::from_record)
            .collect())
    }

    pub fn count(&self) -> CatalogResult<usize> {
        Ok(self.store.collection(PRODUCTS)?.len())
    }

    pub fn get(&self, id: &str) -> CatalogResult<Option<Product>> {
        Ok(self.store.find(PRODUCTS, id)?.map(Product::from_record))
    }

    /// Store `fields` as a new product under a freshly generated id.
    pub fn create(&self, fields: Record) -> CatalogResult<Product> {
        let id = self.unused_id()?;
        let product = Product::new(id, fields);
        self.store.insert(PRODUCTS, product.fields().clone())?;
        tracing::info!(id = product.id().unwrap_or_default(), "Created product");
        Ok(product)
    }

    /// Merge `patch` into an existing product. `None` when the id is unknown.
    pub fn update(&self, id: &str, patch: &Record) -> CatalogResult<Option<Product>> {
        let updated = self.store.update(PRODUCTS, id, patch)?;
        if updated.is_some() {
            tracing::info!(id, fields = patch.len(), "Updated product");
        }
        Ok(updated.map(Product::from_record))
    }

    /// Remove a product. Unknown ids are not an error.
    pub fn delete(&self, id: &str) -> CatalogResult<bool> {
        let removed = self.store.remove(PRODUCTS, id)?;
        tracing::info!(id, removed, "Deleted product");
        Ok(removed)
    }

    fn unused_id(&self) -> CatalogResult<String> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.generate();
            if self.store.find(PRODUCTS, &id)?.is_none() {
                return Ok(id);
            }
            tracing::warn!(id = %id, "Generated id already in use, retrying");
        }
        Err(CatalogError::IdGeneration {
            attempts: MAX_ID_ATTEMPTS,
        })
    }
}
