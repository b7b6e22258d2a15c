//! Bearer token issuance and verification.
//!
//! Tokens are HS256-signed JWTs carrying a [`Claims`] payload. The signing
//! secret comes from [`TokenConfig`], which the binary builds once at startup
//! and hands to both [`TokenIssuer`] and [`TokenVerifier`].

use std::collections::HashSet;
use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::account::Account;
use crate::error::{AuthError, CoreError};
use crate::types::{AccountNumber, Timestamp};

/// The only algorithm tokens are issued with or accepted under.
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// Default token lifetime in minutes.
pub const DEFAULT_EXPIRY_MINS: i64 = 15;

/// Longest token lifetime accepted from configuration (24 hours).
pub const MAX_EXPIRY_MINS: i64 = 24 * 60;

/// Claims embedded in every issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// External account number of the token holder.
    #[serde(rename = "accountNumber")]
    pub account_number: AccountNumber,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Signing secret and lifetime shared by issuer and verifier.
#[derive(Clone)]
pub struct TokenConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in minutes.
    pub expiry_mins: i64,
}

impl TokenConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expiry_mins: DEFAULT_EXPIRY_MINS,
        }
    }

    pub fn with_expiry_mins(mut self, expiry_mins: i64) -> Self {
        self.expiry_mins = expiry_mins;
        self
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("expiry_mins", &self.expiry_mins)
            .finish()
    }
}

/// Produces signed tokens for authenticated accounts.
#[derive(Clone)]
pub struct TokenIssuer {
    key: EncodingKey,
    expiry_secs: i64,
}

impl TokenIssuer {
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            key: EncodingKey::from_secret(config.secret.as_bytes()),
            expiry_secs: config.expiry_mins.saturating_mul(60),
        }
    }

    pub fn issue(&self, account: &Account) -> Result<String, CoreError> {
        self.issue_at(account, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(&self, account: &Account, now: Timestamp) -> Result<String, CoreError> {
        let iat = now.timestamp();
        let exp = iat
            .checked_add(self.expiry_secs)
            .ok_or_else(|| CoreError::Internal("token expiry overflows".into()))?;
        let claims = Claims {
            account_number: account.account_number,
            iat,
            exp,
        };

        encode(&Header::new(TOKEN_ALGORITHM), &claims, &self.key)
            .map_err(|e| CoreError::Internal(format!("token generation failed: {e}")))
    }
}

/// Only the field needed to vet the algorithm before any signature work.
#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

/// Checks structure, algorithm, signature, and expiry of presented tokens.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(config: &TokenConfig) -> Self {
        let mut validation = Validation::new(TOKEN_ALGORITHM);
        // Expiry is checked against an explicit clock in `verify_at`.
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::new();
        validation.leeway = 0;

        Self {
            key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as if the current time were `now`.
    pub fn verify_at(&self, token: &str, now: Timestamp) -> Result<Claims, AuthError> {
        let header = parse_header(token)?;
        if !matches!(header.alg.parse::<Algorithm>(), Ok(alg) if alg == TOKEN_ALGORITHM) {
            return Err(AuthError::BadAlgorithm);
        }

        let data = decode::<Claims>(token, &self.key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature => AuthError::BadSignature,
                ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                    AuthError::BadAlgorithm
                }
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::Malformed,
            }
        })?;

        if data.claims.exp <= now.timestamp() {
            return Err(AuthError::Expired);
        }

        Ok(data.claims)
    }
}

/// Split a compact JWT and decode its header without trusting it.
fn parse_header(token: &str) -> Result<RawHeader, AuthError> {
    let mut segments = token.split('.');
    let (Some(header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(AuthError::Malformed);
    };

    if header.is_empty() || payload.is_empty() {
        return Err(AuthError::Malformed);
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|_| AuthError::Malformed)?;
    serde_json::from_slice(&bytes).map_err(|_| AuthError::Malformed)
}
