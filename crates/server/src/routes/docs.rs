//! OpenAPI document and Swagger UI page served under `/api-docs`.

use crate::routes::products;
use crate::state::ServerState;
use axum::extract::State;
use axum::response::Html;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::openapi::server::Server;
use utoipa::{OpenApi, ToSchema};

/// Product
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"name": "Iphone 11", "category": "Mobile", "price": "2000"}))]
pub struct ProductDoc {
    /// The auto-generated id of the product
    #[schema(read_only)]
    pub id: Option<String>,
    /// The product name
    pub name: String,
    /// The category name
    pub category: String,
    /// Price of the product, a string or a number
    #[schema(value_type = String)]
    pub price: serde_json::Value,
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "api-test",
        version = "1.0.0",
        description = "Demo REST API over a product catalog stored in a JSON file"
    ),
    servers((url = "http://localhost:4000")),
    paths(
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
    ),
    components(schemas(ProductDoc)),
    tags((name = "Products", description = "The products managing API"))
)]
pub struct ApiDoc;

/// OpenAPI document, with the server URL pointing at the configured port.
pub async fn openapi_json(State(state): State<Arc<ServerState>>) -> Json<utoipa::openapi::OpenApi> {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![Server::new(format!(
        "http://localhost:{}",
        state.config.port
    ))]);
    Json(doc)
}

/// Interactive documentation page.
pub async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

const SWAGGER_UI_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>api-test</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {
      window.ui = SwaggerUIBundle({ url: "/api-docs/openapi.json", dom_id: "#swagger-ui" });
    };
  </script>
</body>
</html>
"##;
