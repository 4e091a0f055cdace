//! HS256 token issuance and verification.
//!
//! Tokens use the standard compact `header.payload.signature` serialization,
//! so any compliant JWT library can validate what is issued here. Expiry is
//! exact to the second: verification runs with zero leeway, and callers must
//! not assume any grace window.

use super::config::JwtConfig;
use super::AuthError;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The claim set derived from one verified identity.
///
/// Built fresh per issuance: `jti` is a new v4 UUID every time, never
/// derived from the identity's own id, so two tokens for the same user
/// always carry different token ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the identity's email
    pub sub: String,
    /// Fresh unique token id
    pub jti: String,
    pub given_name: String,
    pub family_name: String,
}

impl Claims {
    /// Derive the canonical claim set from identity fields.
    ///
    /// The subject email must be non-empty; everything else passes through.
    pub fn for_identity(
        email: &str,
        given_name: &str,
        family_name: &str,
    ) -> Result<Self, AuthError> {
        if email.trim().is_empty() {
            return Err(AuthError::InvalidIdentity);
        }

        Ok(Self {
            sub: email.to_string(),
            jti: Uuid::new_v4().to_string(),
            given_name: given_name.to_string(),
            family_name: family_name.to_string(),
        })
    }
}

/// Claim set as it appears on the wire: identity claims plus the registered
/// claims stamped by the issuer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(flatten)]
    pub identity: Claims,
    pub iss: String,
    pub aud: String,
    /// Expiration, seconds since epoch
    pub exp: i64,
}

/// A signed compact token together with its expiry instant.
#[derive(Debug, Clone)]
pub struct SignedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Stateless token mint and verifier over a shared [`JwtConfig`].
///
/// Holds no per-call state; cloning is cheap and concurrent use is safe.
#[derive(Clone)]
pub struct TokenService {
    config: JwtConfig,
}

impl TokenService {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }

    /// Sign a claim set into a compact token expiring `expiration_hours`
    /// from now, exact to the second.
    pub fn issue(&self, claims: Claims) -> Result<SignedToken, AuthError> {
        if self.config.secret.is_empty() {
            return Err(AuthError::Configuration(
                "signing secret is empty".to_string(),
            ));
        }

        let exp = (Utc::now() + Duration::hours(self.config.expiration_hours)).timestamp();
        // Second precision, matching the `exp` claim exactly
        let expires_at = DateTime::from_timestamp(exp, 0)
            .ok_or_else(|| AuthError::Configuration("expiry out of range".to_string()))?;

        let claims = TokenClaims {
            identity: claims,
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            exp,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.secret.as_bytes()),
        )
        .map_err(|e| AuthError::Configuration(e.to_string()))?;

        Ok(SignedToken { token, expires_at })
    }

    /// Verify signature, issuer, audience, and expiry (zero clock skew) and
    /// return the decoded claims.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_audience(&[&self.config.audience]);

        decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.config.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig::new(
            "https://issuer.test",
            "https://audience.test",
            "a-test-secret-long-enough-to-be-plausible",
            2,
        )
    }

    fn test_claims() -> Claims {
        Claims::for_identity("jo@example.com", "Jo", "Silva").unwrap()
    }

    #[test]
    fn issue_and_verify_roundtrip() {
        let tokens = TokenService::new(test_config());

        let before = Utc::now().timestamp();
        let signed = tokens.issue(test_claims()).unwrap();
        let after = Utc::now().timestamp();

        let decoded = tokens.verify(&signed.token).unwrap();
        assert_eq!(decoded.identity.sub, "jo@example.com");
        assert_eq!(decoded.identity.given_name, "Jo");
        assert_eq!(decoded.identity.family_name, "Silva");
        assert_eq!(decoded.iss, "https://issuer.test");
        assert_eq!(decoded.aud, "https://audience.test");

        // Expiry is issuance time plus the configured hours, exactly
        assert!(decoded.exp >= before + 2 * 3600);
        assert!(decoded.exp <= after + 2 * 3600);
        assert_eq!(decoded.exp, signed.expires_at.timestamp());
    }

    #[test]
    fn token_has_three_compact_segments() {
        let tokens = TokenService::new(test_config());
        let signed = tokens.issue(test_claims()).unwrap();
        assert_eq!(signed.token.split('.').count(), 3);
    }

    #[test]
    fn successive_issues_differ_in_jti_and_signature() {
        let tokens = TokenService::new(test_config());

        let first = tokens.issue(test_claims()).unwrap();
        let second = tokens.issue(test_claims()).unwrap();
        assert_ne!(first.token, second.token);

        let first = tokens.verify(&first.token).unwrap();
        let second = tokens.verify(&second.token).unwrap();
        assert_ne!(first.identity.jti, second.identity.jti);
    }

    #[test]
    fn claims_require_an_email() {
        assert!(matches!(
            Claims::for_identity("", "Jo", "Silva"),
            Err(AuthError::InvalidIdentity)
        ));
        assert!(matches!(
            Claims::for_identity("   ", "Jo", "Silva"),
            Err(AuthError::InvalidIdentity)
        ));
    }

    #[test]
    fn jti_is_not_derived_from_identity() {
        let a = Claims::for_identity("jo@example.com", "Jo", "Silva").unwrap();
        let b = Claims::for_identity("jo@example.com", "Jo", "Silva").unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn tampered_payload_fails_verification() {
        let tokens = TokenService::new(test_config());
        let signed = tokens.issue(test_claims()).unwrap();

        let mut segments: Vec<String> = signed.token.split('.').map(String::from).collect();
        let payload = segments[1].clone();
        let flipped = if payload.as_bytes()[0] == b'A' { 'B' } else { 'A' };
        segments[1] = format!("{}{}", flipped, &payload[1..]);
        let tampered = segments.join(".");
        assert_ne!(tampered, signed.token);

        assert!(matches!(
            tokens.verify(&tampered),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn wrong_secret_fails_verification() {
        let tokens = TokenService::new(test_config());
        let signed = tokens.issue(test_claims()).unwrap();

        let other = TokenService::new(JwtConfig::new(
            "https://issuer.test",
            "https://audience.test",
            "a-different-secret-entirely-from-the-first",
            2,
        ));
        assert!(other.verify(&signed.token).is_err());
    }

    #[test]
    fn wrong_issuer_or_audience_fails_verification() {
        let tokens = TokenService::new(test_config());
        let signed = tokens.issue(test_claims()).unwrap();

        let mut config = test_config();
        config.issuer = "https://someone-else.test".to_string();
        assert!(TokenService::new(config).verify(&signed.token).is_err());

        let mut config = test_config();
        config.audience = "https://someone-else.test".to_string();
        assert!(TokenService::new(config).verify(&signed.token).is_err());
    }

    #[test]
    fn expired_token_is_rejected_with_zero_leeway() {
        let config = test_config();
        // Hand-sign a token that expired two seconds ago; a default 60s
        // leeway would accept it, zero leeway must not.
        let claims = TokenClaims {
            identity: test_claims(),
            iss: config.issuer.clone(),
            aud: config.audience.clone(),
            exp: (Utc::now() - Duration::seconds(2)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        let tokens = TokenService::new(config);
        assert!(matches!(
            tokens.verify(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn empty_secret_is_a_configuration_error() {
        let tokens = TokenService::new(JwtConfig::new("iss", "aud", "", 2));
        assert!(matches!(
            tokens.issue(test_claims()),
            Err(AuthError::Configuration(_))
        ));
    }

    #[test]
    fn garbage_input_is_an_invalid_token() {
        let tokens = TokenService::new(test_config());
        assert!(tokens.verify("not-a-token").is_err());
        assert!(tokens.verify("").is_err());
    }
}
