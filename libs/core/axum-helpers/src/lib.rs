//! # Axum Helpers
//!
//! Utilities, middleware, and helpers shared by the HTTP services in this
//! workspace.
//!
//! ## Modules
//!
//! - **[`auth`]**: JWT configuration, token issuance and verification, and
//!   the bearer-token middleware
//! - **[`errors`]**: structured error responses
//! - **[`extractors`]**: custom extractors (validated JSON)
//! - **[`middleware`]**: request logging and security headers
//! - **[`server`]**: router assembly, health endpoint, graceful shutdown

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod middleware;
pub mod server;

// Re-export auth types
pub use auth::{
    bearer_auth_middleware, AuthError, Claims, JwtConfig, SignedToken, TokenClaims, TokenService,
};

// Re-export error types
pub use errors::ErrorResponse;

// Re-export extractors
pub use extractors::ValidatedJson;

// Re-export server helpers
pub use server::{create_app, create_router, health_router, shutdown_signal};
