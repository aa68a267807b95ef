//! # JSON Store
//!
//! A small document store that keeps one JSON document on disk and mirrors it
//! in memory. The document maps collection names to ordered arrays of
//! open-schema records; every mutation rewrites the whole document.
//!
//! ## Core Features
//!
//! - **Whole-document persistence**: load once at startup, write the full
//!   document back after each insert, update, or remove.
//! - **Pluggable Backends**: the bytes live behind the [`StorageBackend`]
//!   trait. A JSON file backend (in-place overwrite or atomic rename) and an
//!   in-memory backend for tests are provided.
//! - **Serialized mutations**: a write lock is held across mutate + persist, so
//!   concurrent writers inside one process never drop each other's changes.
//!
//! ## Example Usage
//!
//! ```
//! use store::{DocumentStore, StoreConfig, BackendConfig};
//! use serde_json::json;
//!
//! let store = DocumentStore::open(StoreConfig::new(BackendConfig::in_memory())).unwrap();
//!
//! let record = json!({ "id": "abc", "name": "Iphone 11" }).as_object().cloned().unwrap();
//! store.insert("products", record).unwrap();
//!
//! let found = store.find("products", "abc").unwrap();
//! assert_eq!(found.unwrap()["name"], "Iphone 11");
//! ```

mod backend;
mod document;

pub use backend::{BackendConfig, FileBackend, InMemoryBackend, StorageBackend, WriteMode};
pub use document::{shallow_merge, Document, Record};

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;

/// Field that identifies a record within its collection.
pub const ID_FIELD: &str = "id";

/// Collection created on load when the document does not have it.
pub const DEFAULT_COLLECTION: &str = "products";

/// Store configuration
#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub backend: BackendConfig,
    /// Collections guaranteed to exist after load.
    pub default_collections: Vec<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            default_collections: vec![DEFAULT_COLLECTION.to_string()],
        }
    }
}

impl StoreConfig {
    pub fn new(backend: BackendConfig) -> Self {
        Self {
            backend,
            ..Self::default()
        }
    }
}

/// Custom error type
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(String),
    #[error("Corrupt document: {0}")]
    Corrupt(String),
    #[error("Serialization encode error: {0}")]
    Encode(String),
    #[error("Collection '{name}' is a {found}, expected an array")]
    InvalidCollection { name: String, found: &'static str },
    #[error("Backend error: {0}")]
    Backend(String),
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e.to_string())
    }
}

impl StoreError {
    pub fn backend<E: std::fmt::Display>(err: E) -> Self {
        Self::Backend(err.to_string())
    }
}

/// Document store
pub struct DocumentStore {
    /// Where the serialized document lives.
    backend: Box<dyn StorageBackend>,
    /// In-memory mirror of the last persisted document.
    document: RwLock<Document>,
}

impl DocumentStore {
    /// Build the configured backend and load the document from it.
    pub fn open(cfg: StoreConfig) -> Result<Self, StoreError> {
        let backend = cfg.backend.build()?;
        Self::with_backend(&cfg, backend)
    }

    /// Load from a caller-supplied backend.
    ///
    /// Absent or blank content starts an empty document. Default collections
    /// are added and the result is persisted straight away, so the backing
    /// file always exists once the store is open. Content that does not
    /// parse fails the load.
    pub fn with_backend(
        cfg: &StoreConfig,
        backend: Box<dyn StorageBackend>,
    ) -> Result<Self, StoreError> {
        let mut document = match backend.load()? {
            Some(bytes) if !bytes.iter().all(u8::is_ascii_whitespace) => {
                Document::from_slice(&bytes)?
            }
            _ => {
                tracing::info!(location = %backend.location(), "Starting with an empty document");
                Document::new()
            }
        };

        for name in &cfg.default_collections {
            if document.ensure_collection(name) {
                tracing::debug!(collection = %name, "Added default collection");
            }
        }

        backend.save(&document.to_vec_pretty()?)?;
        tracing::info!(
            location = %backend.location(),
            collections = document.collection_names().count(),
            "Document store loaded"
        );

        Ok(Self {
            backend,
            document: RwLock::new(document),
        })
    }

    /// Every record in `collection`, in insertion order.
    pub fn collection(&self, collection: &str) -> Result<Vec<Record>, StoreError> {
        self.read()?.records(collection)
    }

    /// First record in `collection` whose `id` equals `id`.
    pub fn find(&self, collection: &str, id: &str) -> Result<Option<Record>, StoreError> {
        Ok(self.read()?.find(collection, id)?.cloned())
    }

    /// Append `record` to `collection` and persist.
    pub fn insert(&self, collection: &str, record: Record) -> Result<Record, StoreError> {
        let mut doc = self.write()?;
        let mut next = doc.clone();
        next.items_mut(collection)?
            .push(serde_json::Value::Object(record.clone()));
        self.commit(&mut doc, next)?;
        Ok(record)
    }

    /// Merge `patch` into the record with `id` and persist.
    ///
    /// Returns the merged record, or `None` without writing anything when no
    /// record matches.
    pub fn update(
        &self,
        collection: &str,
        id: &str,
        patch: &Record,
    ) -> Result<Option<Record>, StoreError> {
        let mut doc = self.write()?;
        let mut next = doc.clone();
        let merged = next
            .items_mut(collection)?
            .iter_mut()
            .filter_map(serde_json::Value::as_object_mut)
            .find(|record| document::has_id(record, id))
            .map(|record| {
                shallow_merge(record, patch);
                record.clone()
            });

        if merged.is_some() {
            self.commit(&mut doc, next)?;
        } else {
            tracing::debug!(collection, id, "Update matched no record");
        }
        Ok(merged)
    }

    /// Drop every record with `id` from `collection`, then persist whether or
    /// not anything matched. Returns `true` if a record was removed.
    pub fn remove(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let mut doc = self.write()?;
        let mut next = doc.clone();
        let items = next.items_mut(collection)?;
        let before = items.len();
        items.retain(|item| !item.as_object().is_some_and(|r| document::has_id(r, id)));
        let removed = items.len() != before;
        self.commit(&mut doc, next)?;
        Ok(removed)
    }

    pub fn location(&self) -> String {
        self.backend.location()
    }

    /// Save `next` and only then make it the live document. A failed save
    /// leaves memory as it was.
    fn commit(&self, live: &mut Document, next: Document) -> Result<(), StoreError> {
        let bytes = next.to_vec_pretty()?;
        if let Err(e) = self.backend.save(&bytes) {
            tracing::error!(location = %self.backend.location(), error = %e, "Persist failed, change discarded");
            return Err(e);
        }
        tracing::debug!(location = %self.backend.location(), bytes = bytes.len(), "Persisted document");
        *live = next;
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Document>, StoreError> {
        self.document
            .read()
            .map_err(|_| StoreError::backend("poisoned lock"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Document>, StoreError> {
        self.document
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))
    }
}
