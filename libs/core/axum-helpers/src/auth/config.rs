//! Token signing configuration.

use core_config::{env_parse, env_required, ConfigError, FromEnv};

/// JWT signing configuration, loaded once at startup and shared read-only.
///
/// Environment variables:
/// - `JWT_ISSUER` (required) — issuer claim stamped into every token
/// - `JWT_AUDIENCE` (required) — audience claim
/// - `JWT_SECRET_KEY` (required, non-empty) — HMAC secret; its UTF-8 bytes
///   key the signature. 32+ characters recommended.
/// - `JWT_EXPIRATION` (required) — token lifetime in whole hours
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub issuer: String,
    pub audience: String,
    pub secret: String,
    pub expiration_hours: i64,
}

impl JwtConfig {
    /// Manual construction, mainly for tests.
    pub fn new(
        issuer: impl Into<String>,
        audience: impl Into<String>,
        secret: impl Into<String>,
        expiration_hours: i64,
    ) -> Self {
        Self {
            issuer: issuer.into(),
            audience: audience.into(),
            secret: secret.into(),
            expiration_hours,
        }
    }
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let issuer = env_required("JWT_ISSUER")?;
        let audience = env_required("JWT_AUDIENCE")?;
        let secret = env_required("JWT_SECRET_KEY")?;

        if secret.is_empty() {
            return Err(ConfigError::ParseError {
                key: "JWT_SECRET_KEY".to_string(),
                details: "must not be empty. Generate one with: openssl rand -base64 32"
                    .to_string(),
            });
        }

        let expiration_hours: i64 = env_parse("JWT_EXPIRATION")?;
        if expiration_hours <= 0 {
            return Err(ConfigError::ParseError {
                key: "JWT_EXPIRATION".to_string(),
                details: format!("must be a positive number of hours (got {expiration_hours})"),
            });
        }

        Ok(Self {
            issuer,
            audience,
            secret,
            expiration_hours,
        })
    }
}
