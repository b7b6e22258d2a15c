//! [`AccountStore`] backed by PostgreSQL.

use async_trait::async_trait;
use tally_core::account::{Account, NewAccount};
use tally_core::error::CoreError;
use tally_core::store::AccountStore;
use tally_core::types::{AccountNumber, DbId};

use crate::repositories::AccountRepo;
use crate::DbPool;

/// PostgreSQL credential store. Cloning shares the underlying pool.
#[derive(Debug, Clone)]
pub struct PgAccountStore {
    pool: DbPool,
}

impl PgAccountStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn create(&self, input: &NewAccount) -> Result<Account, CoreError> {
        if input.secret_hash.is_empty() {
            return Err(CoreError::Validation("secret hash must not be empty".into()));
        }
        let row = AccountRepo::create(
            &self.pool,
            &input.first_name,
            &input.last_name,
            &input.secret_hash,
        )
        .await
        .map_err(map_sqlx_error)?;
        Ok(row.into())
    }

    async fn get_by_id(&self, id: DbId) -> Result<Account, CoreError> {
        AccountRepo::find_by_id(&self.pool, id)
            .await
            .map_err(map_sqlx_error)?
            .map(Account::from)
            .ok_or_else(|| CoreError::account_not_found(id))
    }

    async fn get_by_account_number(&self, number: AccountNumber) -> Result<Account, CoreError> {
        AccountRepo::find_by_account_number(&self.pool, number)
            .await
            .map_err(map_sqlx_error)?
            .map(Account::from)
            .ok_or_else(|| CoreError::account_not_found(number))
    }

    async fn delete(&self, id: DbId) -> Result<(), CoreError> {
        if AccountRepo::delete(&self.pool, id)
            .await
            .map_err(map_sqlx_error)?
        {
            Ok(())
        } else {
            Err(CoreError::account_not_found(id))
        }
    }
}

/// Translate a sqlx error into the core taxonomy.
///
/// - Unique violations (SQLSTATE 23505) become `Conflict`.
/// - Other server-side errors become `Internal`.
/// - Connection, pool, and protocol failures become `StoreUnavailable`.
pub fn map_sqlx_error(err: sqlx::Error) -> CoreError {
    match err {
        sqlx::Error::RowNotFound => CoreError::Internal("unexpected empty result".into()),
        sqlx::Error::Database(db_err) => {
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                return CoreError::Conflict(format!(
                    "Duplicate value violates unique constraint: {constraint}"
                ));
            }
            tracing::error!(error = %db_err, "Database error");
            CoreError::Internal(db_err.to_string())
        }
        other => {
            tracing::error!(error = %other, "Database unavailable");
            CoreError::StoreUnavailable(other.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn pool_failures_are_store_unavailable() {
        assert_matches!(
            map_sqlx_error(sqlx::Error::PoolTimedOut),
            CoreError::StoreUnavailable(_)
        );
        assert_matches!(
            map_sqlx_error(sqlx::Error::PoolClosed),
            CoreError::StoreUnavailable(_)
        );
    }

    #[test]
    fn row_not_found_is_internal() {
        assert_matches!(
            map_sqlx_error(sqlx::Error::RowNotFound),
            CoreError::Internal(_)
        );
    }
}
