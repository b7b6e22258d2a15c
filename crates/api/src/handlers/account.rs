//! Handlers for the `/account` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tally_core::account::{Account, CreateAccountRequest};

use crate::error::AppResult;
use crate::middleware::auth::AuthorizedAccount;
use crate::state::AppState;

/// POST /account
///
/// Open a new account. The id and account number are assigned by the store.
pub async fn create_account(
    State(state): State<AppState>,
    payload: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Account>)> {
    let Json(input) = payload?;
    let account = state.accounts.create_account(&input).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// GET /account/{id}
pub async fn get_account(
    State(state): State<AppState>,
    auth: AuthorizedAccount,
) -> AppResult<Json<Account>> {
    let account = state.accounts.get_account(auth.account_id).await?;
    Ok(Json(account))
}

/// DELETE /account/{id}
///
/// Permanently remove the caller's account. Returns 204 No Content.
pub async fn delete_account(
    State(state): State<AppState>,
    auth: AuthorizedAccount,
) -> AppResult<StatusCode> {
    state.accounts.delete_account(auth.account_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
