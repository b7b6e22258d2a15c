use crate::types::DbId;

/// Reasons a credential or bearer token is rejected.
///
/// The variants exist for logging and tests only. Callers at the transport
/// boundary must collapse all of them into a single "permission denied".
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("token is malformed")]
    Malformed,

    #[error("token uses an unexpected signing algorithm")]
    BadAlgorithm,

    #[error("token signature does not match")]
    BadSignature,

    #[error("token has expired")]
    Expired,

    #[error("invalid account number or password")]
    InvalidCredentials,
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a missing account, keyed by internal id or account number.
    pub fn account_not_found(id: DbId) -> Self {
        CoreError::NotFound {
            entity: "Account",
            id,
        }
    }
}
