//! Token-and-ownership extractor for per-account routes.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use tally_core::auth::token::Claims;
use tally_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the bearer token.
pub const TOKEN_HEADER: &str = "x-jwt-token";

/// Proof that the caller holds a valid token for the account in the path.
///
/// Use as an extractor on any route shaped `/.../{id}`:
///
/// ```ignore
/// async fn my_handler(auth: AuthorizedAccount) -> AppResult<Json<()>> {
///     tracing::info!(account_id = auth.account_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// Every rejection (missing header, bad path id, invalid token, wrong owner)
/// renders as the same `401 permission denied`.
#[derive(Debug, Clone)]
pub struct AuthorizedAccount {
    /// Internal id from the request path, confirmed to belong to the caller.
    pub account_id: DbId,
    /// Verified token claims.
    pub claims: Claims,
}

impl FromRequestParts<AppState> for AuthorizedAccount {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
            .ok_or_else(|| {
                tracing::debug!("access denied: missing token header");
                AppError::PermissionDenied
            })?;

        let Path(account_id) = Path::<DbId>::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                tracing::debug!("access denied: unparsable account id");
                AppError::PermissionDenied
            })?;

        let claims = state.accounts.authorize(&token, account_id).await?;

        Ok(AuthorizedAccount { account_id, claims })
    }
}
