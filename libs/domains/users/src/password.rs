//! One-way hashing for credential secrets.
//!
//! bcrypt with a fixed cost factor, so hashes produced at any point stay
//! verifiable as long as the cost is not lowered below the stored values.
//! The salt is generated per call and embedded in the hash string.

use crate::error::{UserError, UserResult};

/// bcrypt only keys the first 72 bytes of input; longer secrets are
/// rejected rather than silently truncated.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Work factor, held constant so verification stays compatible across calls.
const HASH_COST: u32 = bcrypt::DEFAULT_COST;

/// Hash a plaintext secret into a salted bcrypt string (`$2…$` format).
///
/// Fails when the plaintext exceeds [`MAX_PASSWORD_BYTES`] after UTF-8
/// encoding. Error values never carry the plaintext.
pub fn hash(plaintext: &str) -> UserResult<String> {
    if plaintext.len() > MAX_PASSWORD_BYTES {
        return Err(UserError::PasswordHash(format!(
            "password exceeds the {MAX_PASSWORD_BYTES}-byte bcrypt input limit"
        )));
    }

    bcrypt::hash(plaintext, HASH_COST).map_err(|e| UserError::PasswordHash(e.to_string()))
}

/// Check a candidate secret against a stored hash.
///
/// Returns `false` — never an error — for a missing, empty, or malformed
/// stored hash: an identity without a credential can never authenticate by
/// password. The comparison is constant-time inside the bcrypt crate.
pub fn verify(stored: Option<&str>, candidate: &str) -> bool {
    match stored {
        Some(hash) if !hash.is_empty() => bcrypt::verify(candidate, hash).unwrap_or(false),
        _ => false,
    }
}
