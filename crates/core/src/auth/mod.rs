//! Authentication and authorization primitives.
//!
//! - [`password`] -- Argon2id secret hashing and verification.
//! - [`token`] -- HS256 token issuance and verification.
//! - [`guard`] -- Ownership check between token claims and a requested account.

pub mod guard;
pub mod password;
pub mod token;
