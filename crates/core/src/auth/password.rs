//! Argon2id secret hashing, verification, and length validation.
//!
//! Hashes use the Argon2id variant with default parameters and a random salt
//! drawn from [`OsRng`]. The PHC string format is stored so that parameters
//! and salt travel with the hash.

use std::sync::OnceLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::CoreError;

/// Shortest secret accepted at account creation, in bytes.
pub const MIN_SECRET_LEN: usize = 6;

/// Longest secret accepted at account creation, in bytes.
pub const MAX_SECRET_LEN: usize = 128;

/// Hash a plaintext secret using Argon2id with a random salt.
///
/// Returns the PHC-formatted hash string.
pub fn hash_password(secret: &str) -> Result<String, CoreError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map_err(|e| CoreError::Internal(format!("password hashing failed: {e}")))?;
    Ok(hash.to_string())
}

/// Verify a plaintext secret against a stored PHC-formatted hash.
///
/// Returns `Ok(false)` on mismatch. An `Err` means the stored hash itself is
/// unreadable.
pub fn verify_password(secret: &str, hash: &str) -> Result<bool, CoreError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| CoreError::Internal(format!("stored password hash is invalid: {e}")))?;
    match Argon2::default().verify_password(secret.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(CoreError::Internal(format!(
            "password verification failed: {e}"
        ))),
    }
}

/// Hash of a throwaway secret, computed once per process.
///
/// Login verifies against this when the account number is unknown, so a miss
/// costs the same Argon2 work as a wrong password.
pub fn dummy_hash() -> Result<&'static str, CoreError> {
    static DUMMY: OnceLock<String> = OnceLock::new();
    if let Some(hash) = DUMMY.get() {
        return Ok(hash);
    }
    let hash = hash_password("tally-no-such-account")?;
    Ok(DUMMY.get_or_init(|| hash))
}

/// Check a secret against [`MIN_SECRET_LEN`] and [`MAX_SECRET_LEN`].
pub fn validate_secret(secret: &str) -> Result<(), CoreError> {
    if secret.len() < MIN_SECRET_LEN {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_SECRET_LEN} bytes long"
        )));
    }
    if secret.len() > MAX_SECRET_LEN {
        return Err(CoreError::Validation(format!(
            "Password must be at most {MAX_SECRET_LEN} bytes long"
        )));
    }
    Ok(())
}
