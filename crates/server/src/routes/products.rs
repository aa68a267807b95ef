//! `/products` handlers.
//!
//! Each handler maps onto one catalog call. Lookups and deletes of unknown
//! ids answer 200 with an empty body rather than 404.

use crate::error::ServerResult;
use crate::routes::docs::ProductDoc;
use crate::state::ServerState;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use catalog::{parse_body, Product};
use std::sync::Arc;

/// Returns the list of all the products
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    responses(
        (status = 200, description = "The list of the products", body = [ProductDoc])
    )
)]
pub async fn list_products(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<Json<Vec<Product>>> {
    Ok(Json(state.catalog.list()?))
}

/// Get the product by id
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "The product id")),
    responses(
        (status = 200, description = "The product, or an empty body when no product has this id", body = ProductDoc)
    )
)]
pub async fn get_product(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> ServerResult<Response> {
    Ok(found_or_empty(state.catalog.get(&id)?))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    request_body(content = ProductDoc, content_type = "application/json"),
    responses(
        (status = 200, description = "Product was successfully created", body = ProductDoc),
        (status = 500, description = "Some server error")
    )
)]
pub async fn create_product(
    State(state): State<Arc<ServerState>>,
    body: Bytes,
) -> ServerResult<Json<Product>> {
    let fields = parse_body(&body)?;
    Ok(Json(state.catalog.create(fields)?))
}

/// Update the product by the id
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "The product id")),
    request_body(content = ProductDoc, content_type = "application/json"),
    responses(
        (status = 200, description = "The product was updated; empty body when no product has this id", body = ProductDoc),
        (status = 500, description = "Server error happened")
    )
)]
pub async fn update_product(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> ServerResult<Response> {
    let patch = parse_body(&body)?;
    Ok(found_or_empty(state.catalog.update(&id, &patch)?))
}

/// Remove the product by id
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "The product id")),
    responses(
        (status = 200, description = "The product was deleted, or did not exist")
    )
)]
pub async fn delete_product(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> ServerResult<StatusCode> {
    state.catalog.delete(&id)?;
    Ok(StatusCode::OK)
}

fn found_or_empty(product: Option<Product>) -> Response {
    match product {
        Some(product) => Json(product).into_response(),
        None => StatusCode::OK.into_response(),
    }
}
