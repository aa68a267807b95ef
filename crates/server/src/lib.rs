//! Products Server - HTTP REST API over the JSON-file product catalog
//!
//! Exposes CRUD over a single `products` collection persisted to one JSON
//! document on disk, plus generated API documentation.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /products` - List all products
//! - `GET /products/{id}` - Get a product (empty body when unknown)
//! - `POST /products` - Create a product with a generated id
//! - `PUT /products/{id}` - Merge fields into a product
//! - `DELETE /products/{id}` - Remove a product
//! - `GET /api-docs` - Swagger UI
//! - `GET /api-docs/openapi.json` - OpenAPI document
//! - `GET /health` - Liveness probe
//!
//! Every request is logged and gets permissive CORS headers. There is no
//! authentication.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use crate::config::ServerConfig;
pub use crate::error::{ServerError, ServerResult};
pub use crate::server::{build_router, start_server};
pub use crate::state::ServerState;
