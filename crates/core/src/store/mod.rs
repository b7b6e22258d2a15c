//! The credential store capability.
//!
//! [`AccountStore`] is the only way the rest of the system reads or changes
//! persisted accounts. The PostgreSQL implementation lives in `tally-db`;
//! [`memory::InMemoryAccountStore`] backs unit and HTTP tests.

pub mod memory;

use async_trait::async_trait;

use crate::account::{Account, NewAccount};
use crate::error::CoreError;
use crate::types::{AccountNumber, DbId};

pub use memory::InMemoryAccountStore;

/// First value handed out by account-number generators.
pub const ACCOUNT_NUMBER_START: AccountNumber = 100_000_000;

/// Persistence contract for accounts.
///
/// Lookups that miss return [`CoreError::NotFound`]. Implementations map
/// uniqueness violations to [`CoreError::Conflict`] and transport failures to
/// [`CoreError::StoreUnavailable`].
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Persist a new account and return it with its server-assigned `id` and
    /// `account_number`.
    async fn create(&self, input: &NewAccount) -> Result<Account, CoreError>;

    async fn get_by_id(&self, id: DbId) -> Result<Account, CoreError>;

    async fn get_by_account_number(&self, number: AccountNumber) -> Result<Account, CoreError>;

    /// Permanently remove an account.
    async fn delete(&self, id: DbId) -> Result<(), CoreError>;
}
