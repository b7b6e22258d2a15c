pub mod account;
pub mod auth;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree.
///
/// ```text
/// /health                 service status (public)
/// /login                  login (public)
/// /account                create (public)
/// /account/{id}           get, delete (requires x-jwt-token for that account)
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(account::router())
}
