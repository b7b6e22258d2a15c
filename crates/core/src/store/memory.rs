//! In-memory [`AccountStore`] used by tests and local tooling.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{AccountStore, ACCOUNT_NUMBER_START};
use crate::account::{Account, NewAccount};
use crate::error::CoreError;
use crate::types::{AccountNumber, DbId};

#[derive(Debug)]
struct Inner {
    accounts: BTreeMap<DbId, Account>,
    next_id: DbId,
    next_account_number: AccountNumber,
}

/// Map-backed store mirroring the PostgreSQL sequences: ids start at 1,
/// account numbers at [`ACCOUNT_NUMBER_START`], and neither is ever reused.
#[derive(Debug)]
pub struct InMemoryAccountStore {
    inner: RwLock<Inner>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                accounts: BTreeMap::new(),
                next_id: 1,
                next_account_number: ACCOUNT_NUMBER_START,
            }),
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.accounts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.accounts.is_empty()
    }
}

impl Default for InMemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn create(&self, input: &NewAccount) -> Result<Account, CoreError> {
        if input.secret_hash.is_empty() {
            return Err(CoreError::Validation("secret hash must not be empty".into()));
        }

        let mut inner = self.inner.write().await;
        let account = Account {
            id: inner.next_id,
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            account_number: inner.next_account_number,
            secret_hash: input.secret_hash.clone(),
            balance: 0.0,
            created_at: Utc::now(),
        };
        inner.next_id += 1;
        inner.next_account_number += 1;
        inner.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn get_by_id(&self, id: DbId) -> Result<Account, CoreError> {
        self.inner
            .read()
            .await
            .accounts
            .get(&id)
            .cloned()
            .ok_or_else(|| CoreError::account_not_found(id))
    }

    async fn get_by_account_number(&self, number: AccountNumber) -> Result<Account, CoreError> {
        self.inner
            .read()
            .await
            .accounts
            .values()
            .find(|a| a.account_number == number)
            .cloned()
            .ok_or_else(|| CoreError::account_not_found(number))
    }

    async fn delete(&self, id: DbId) -> Result<(), CoreError> {
        self.inner
            .write()
            .await
            .accounts
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| CoreError::account_not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn new_account(first: &str) -> NewAccount {
        NewAccount {
            first_name: first.into(),
            last_name: "Smith".into(),
            secret_hash: "hash".into(),
        }
    }

    #[tokio::test]
    async fn create_assigns_ids_and_account_numbers() {
        let store = InMemoryAccountStore::new();
        let alice = store.create(&new_account("Alice")).await.unwrap();
        let bob = store.create(&new_account("Bob")).await.unwrap();

        assert_eq!(alice.id, 1);
        assert_eq!(bob.id, 2);
        assert_eq!(alice.account_number, ACCOUNT_NUMBER_START);
        assert_ne!(alice.account_number, bob.account_number);
        assert_eq!(alice.balance, 0.0);
    }

    #[tokio::test]
    async fn lookups_return_full_records() {
        let store = InMemoryAccountStore::new();
        let created = store.create(&new_account("Alice")).await.unwrap();

        let by_id = store.get_by_id(created.id).await.unwrap();
        let by_number = store
            .get_by_account_number(created.account_number)
            .await
            .unwrap();

        assert_eq!(by_id.account_number, created.account_number);
        assert_eq!(by_number.id, created.id);
        assert_eq!(by_number.secret_hash, "hash");
    }

    #[tokio::test]
    async fn missing_lookups_are_not_found() {
        let store = InMemoryAccountStore::new();
        assert_matches!(
            store.get_by_id(42).await,
            Err(CoreError::NotFound { entity: "Account", id: 42 })
        );
        assert_matches!(
            store.get_by_account_number(5).await,
            Err(CoreError::NotFound { .. })
        );
    }

    #[tokio::test]
    async fn delete_removes_row_and_ids_are_not_reused() {
        let store = InMemoryAccountStore::new();
        let first = store.create(&new_account("Alice")).await.unwrap();
        store.delete(first.id).await.unwrap();

        assert_matches!(store.get_by_id(first.id).await, Err(CoreError::NotFound { .. }));
        assert_matches!(store.delete(first.id).await, Err(CoreError::NotFound { .. }));
        assert!(store.is_empty().await);

        let second = store.create(&new_account("Bob")).await.unwrap();
        assert_ne!(second.id, first.id);
        assert_ne!(second.account_number, first.account_number);
    }

    #[tokio::test]
    async fn empty_secret_hash_is_rejected() {
        let store = InMemoryAccountStore::new();
        let mut input = new_account("Alice");
        input.secret_hash.clear();

        assert_matches!(store.create(&input).await, Err(CoreError::Validation(_)));
        assert_eq!(store.len().await, 0);
    }
}
