//! Row type for the `account` table.

use sqlx::FromRow;
use tally_core::account::Account;
use tally_core::types::{AccountNumber, DbId, Timestamp};

/// Full row from the `account` table, including the password hash.
#[derive(Clone, FromRow)]
pub struct AccountRow {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub account_number: AccountNumber,
    pub encrypted_password: String,
    pub balance: f64,
    pub created_at: Timestamp,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Account {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            account_number: row.account_number,
            secret_hash: row.encrypted_password,
            balance: row.balance,
            created_at: row.created_at,
        }
    }
}
