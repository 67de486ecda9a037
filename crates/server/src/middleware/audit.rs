//! Audit logging for action webhook calls

use axum::{body::Body, extract::Request, http::Method, middleware::Next, response::Response};

use super::request_id::RequestId;

/// Log every POST with its request ID and resulting status
pub async fn audit_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().path().to_string();
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|r| r.0.clone())
        .unwrap_or_else(|| "unknown".to_string());

    let response = next.run(request).await;

    if method == Method::POST {
        tracing::info!(
            target: "audit",
            request_id = %request_id,
            path = %uri,
            status = %response.status().as_u16(),
            "Action request"
        );
    }

    response
}
