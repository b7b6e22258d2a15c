//! Route definitions for the `/account` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::account;
use crate::state::AppState;

/// ```text
/// POST   /account         -> create_account (public)
/// GET    /account/{id}    -> get_account (token + ownership)
/// DELETE /account/{id}    -> delete_account (token + ownership)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/account", post(account::create_account))
        .route(
            "/account/{id}",
            get(account::get_account).delete(account::delete_account),
        )
}
