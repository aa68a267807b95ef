//! Product catalog backed by a single JSON document.
//!
//! This crate holds the product domain: the open-schema [`Product`] record,
//! id generation, and [`ProductCatalog`], which maps list/get/create/update/
//! delete onto the `products` collection of a [`store::DocumentStore`]. The
//! HTTP surface lives in the `server` crate.
//!
//! ```
//! use products::{ProductCatalog, parse_body};
//! use store::{BackendConfig, DocumentStore, StoreConfig};
//! use std::sync::Arc;
//!
//! let store = Arc::new(DocumentStore::open(StoreConfig::new(BackendConfig::in_memory())).unwrap());
//! let catalog = ProductCatalog::new(store);
//!
//! let body = parse_body(br#"{"name":"Iphone 11","category":"Mobile","price":"2000"}"#).unwrap();
//! let created = catalog.create(body).unwrap();
//! assert_eq!(created.id().map(str::len), Some(8));
//! assert_eq!(catalog.get(created.id().unwrap()).unwrap(), Some(created));
//! ```

pub mod catalog;
pub mod id;
pub mod product;

pub use catalog::{parse_body, CatalogError, CatalogResult, ProductCatalog, PRODUCTS};
pub use id::{IdGenerator, RandomIds, ID_ALPHABET, ID_LENGTH};
pub use product::{Price, Product};

pub use store;
