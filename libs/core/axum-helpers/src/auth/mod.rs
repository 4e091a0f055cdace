//! JWT signing configuration, token issuance/verification, and the
//! bearer-token middleware guarding protected routes.

pub mod config;
pub mod jwt;
pub mod middleware;

use thiserror::Error;

pub use config::JwtConfig;
pub use jwt::{Claims, SignedToken, TokenClaims, TokenService};
pub use middleware::bearer_auth_middleware;

/// Errors raised while building claims or signing/verifying tokens.
///
/// Configuration problems are startup-fatal in practice, but they are
/// surfaced as values here so the caller decides between failing fast and
/// reporting a request-level fault.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("identity has no email address")]
    InvalidIdentity,

    #[error("token signing misconfigured: {0}")]
    Configuration(String),

    #[error("invalid token: {0}")]
    InvalidToken(String),
}
