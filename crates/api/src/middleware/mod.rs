//! Request extractors that gate protected routes.
//!
//! - [`auth::AuthorizedAccount`] -- Verifies the `x-jwt-token` header and
//!   checks that its holder owns the account named in the path.

pub mod auth;
