//! Credential interceptor: a pipeline stage ahead of the write handlers
//! that replaces a plaintext `password` field in an inbound JSON body with
//! its bcrypt hash. Downstream handlers and the record store only ever see
//! the hash.

use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};
use serde_json::Value;

use crate::error::{UserError, UserResult};
use crate::password;

/// Upper bound on a buffered write body.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Buffer the request body once and forward a new request whose `password`
/// field, when present as a non-empty string, has been replaced by its
/// hash.
///
/// - An empty body passes through untouched.
/// - A body with no `password` (federated identities) passes through with
///   values unchanged.
/// - A body that does not parse as JSON fails the request; the plaintext is
///   never forwarded on error.
///
/// The incoming request is consumed and a fresh one is built around the
/// rewritten bytes, so no shared request state is mutated in place.
pub async fn hash_password_body(request: Request, next: Next) -> Result<Response, UserError> {
    let (mut parts, body) = request.into_parts();

    let bytes = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| UserError::MalformedBody(e.to_string()))?;

    if bytes.is_empty() {
        let request = Request::from_parts(parts, Body::from(bytes));
        return Ok(next.run(request).await);
    }

    let rewritten = rewrite_password_field(&bytes)?;

    parts.headers.insert(
        header::CONTENT_LENGTH,
        HeaderValue::from(rewritten.len()),
    );
    let request = Request::from_parts(parts, Body::from(rewritten));
    Ok(next.run(request).await)
}

/// Parse, hash the `password` member if it is a non-empty string, and
/// re-serialize. Operating on a `Value` keeps unknown fields intact; only
/// the rewritten member changes.
fn rewrite_password_field(bytes: &[u8]) -> UserResult<Vec<u8>> {
    let mut payload: Value =
        serde_json::from_slice(bytes).map_err(|e| UserError::MalformedBody(e.to_string()))?;

    if let Some(object) = payload.as_object_mut() {
        let hashed = match object.get("password") {
            Some(Value::String(plaintext)) if !plaintext.is_empty() => {
                Some(password::hash(plaintext)?)
            }
            _ => None,
        };

        if let Some(hash) = hashed {
            object.insert("password".to_string(), Value::String(hash));
        }
    }

    serde_json::to_vec(&payload).map_err(|e| UserError::Internal(e.to_string()))
}
