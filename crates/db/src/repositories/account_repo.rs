//! Repository for the `account` table.

use sqlx::PgPool;
use tally_core::types::{AccountNumber, DbId};

use crate::models::account::AccountRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, first_name, last_name, account_number, encrypted_password, \
                        balance, created_at";

/// Provides create/read/delete operations for accounts.
pub struct AccountRepo;

impl AccountRepo {
    /// Insert a new account, returning the created row.
    ///
    /// `id` and `account_number` come from their sequences inside the same
    /// statement, so the caller never picks either.
    pub async fn create(
        pool: &PgPool,
        first_name: &str,
        last_name: &str,
        encrypted_password: &str,
    ) -> Result<AccountRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO account (first_name, last_name, encrypted_password)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AccountRow>(&query)
            .bind(first_name)
            .bind(last_name)
            .bind(encrypted_password)
            .fetch_one(pool)
            .await
    }

    /// Find an account by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AccountRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM account WHERE id = $1");
        sqlx::query_as::<_, AccountRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an account by its external account number.
    pub async fn find_by_account_number(
        pool: &PgPool,
        account_number: AccountNumber,
    ) -> Result<Option<AccountRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM account WHERE account_number = $1");
        sqlx::query_as::<_, AccountRow>(&query)
            .bind(account_number)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete an account. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM account WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
