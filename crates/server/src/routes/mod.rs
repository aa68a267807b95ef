//! API route handlers
//!
//! - `products`: CRUD over the product collection
//! - `docs`: OpenAPI document and Swagger UI
//! - `health`: liveness probe

pub mod docs;
pub mod health;
pub mod products;

use crate::error::ServerError;

/// 404 Not Found handler
///
/// Returns a standardized error response for undefined routes.
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
