use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;

static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Correlation id for one request, available to handlers as an extension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestId(pub String);

/// Reuse the caller's `x-request-id` or mint one, and echo it on the response.
pub async fn request_id(mut request: Request, next: Next) -> Response {
    let id = request
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    request.extensions_mut().insert(RequestId(id.clone()));

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(X_REQUEST_ID.clone(), value);
    }
    response
}

/// One line per request: method, path, status, latency, and the product
/// being addressed when there is one.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default();
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
    let product_id = product_id(&path).unwrap_or_default();

    match status {
        500.. => tracing::error!(%method, %path, status, duration_ms, product_id, %request_id, "{method} {path} {status}"),
        400..=499 => tracing::warn!(%method, %path, status, duration_ms, product_id, %request_id, "{method} {path} {status}"),
        _ => tracing::info!(%method, %path, status, duration_ms, product_id, %request_id, "{method} {path} {status}"),
    }

    response
}

/// The `{id}` segment of `/products/{id}`, if the path names one product.
fn product_id(path: &str) -> Option<&str> {
    let id = path.strip_prefix("/products/")?.trim_end_matches('/');
    (!id.is_empty() && !id.contains('/')).then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_id_from_item_paths() {
        assert_eq!(product_id("/products/AbC-12_x"), Some("AbC-12_x"));
        assert_eq!(product_id("/products/AbC-12_x/"), Some("AbC-12_x"));
    }

    #[test]
    fn no_product_id_elsewhere() {
        assert_eq!(product_id("/products"), None);
        assert_eq!(product_id("/products/"), None);
        assert_eq!(product_id("/products/a/b"), None);
        assert_eq!(product_id("/api-docs"), None);
        assert_eq!(product_id("/health"), None);
    }
}
