//! Per-request logging with timing.

use axum::{extract::Request, http::header, middleware::Next, response::Response};
use std::time::Instant;

/// Logs one line when a request arrives and one when it finishes, with
/// method, path, content metadata, response status, and elapsed time.
pub async fn request_logger(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let content_type = header_str(&request, header::CONTENT_TYPE);
    let content_length = header_str(&request, header::CONTENT_LENGTH);

    tracing::info!(%method, %path, "handling request");

    let started = Instant::now();
    let response = next.run(request).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    tracing::info!(
        %method,
        %path,
        content_type,
        content_length,
        status = %response.status(),
        elapsed_ms,
        "finished handling request"
    );

    response
}

fn header_str(request: &Request, name: header::HeaderName) -> Option<String> {
    request
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}
