use tally_core::service::AccountService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the service shares its store behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Login, account lifecycle, and authorization operations.
    pub accounts: AccountService,
}
