//! Bearer-token middleware for protected routes.

use super::jwt::TokenService;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Pull the token out of `Authorization: Bearer <token>`.
fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
}

/// Validates the bearer token against the signing configuration (signature,
/// issuer, audience, exact expiry) and inserts the decoded claims into the
/// request extensions for downstream handlers.
///
/// ```ignore
/// let protected = Router::new()
///     .route("/users", get(list_users))
///     .layer(axum::middleware::from_fn_with_state(
///         token_service.clone(),
///         bearer_auth_middleware,
///     ));
/// ```
pub async fn bearer_auth_middleware(
    State(tokens): State<TokenService>,
    mut request: Request,
    next: Next,
) -> Result<Response, impl IntoResponse> {
    let token = match bearer_token(&request) {
        Some(t) => t.to_string(),
        None => {
            tracing::debug!("no bearer token in Authorization header");
            return Err((StatusCode::UNAUTHORIZED, "No token provided"));
        }
    };

    let claims = match tokens.verify(&token) {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!("token verification failed: {e}");
            return Err((StatusCode::UNAUTHORIZED, "Invalid token"));
        }
    };

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
