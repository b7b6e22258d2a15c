//! Domain core for the tally account service.
//!
//! Everything that makes an authorization decision lives here: the account
//! model, the [`store::AccountStore`] capability, password hashing, token
//! issuance/verification, the access guard, and the [`service::AccountService`]
//! that composes them. The crate knows nothing about HTTP.

pub mod account;
pub mod auth;
pub mod error;
pub mod service;
pub mod store;
pub mod types;
