//! Handler for `/login`.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tally_core::account::{LoginRequest, LoginResponse};

use crate::error::AppResult;
use crate::state::AppState;

/// POST /login
///
/// Authenticate with account number + password. Returns a bearer token to be
/// sent back in the `x-jwt-token` header.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<LoginResponse>> {
    let Json(input) = payload?;
    let response = state
        .accounts
        .login(input.account_number, &input.password)
        .await?;
    Ok(Json(response))
}
