//! Ownership check for per-account resources.

use crate::auth::token::Claims;
use crate::store::AccountStore;
use crate::types::DbId;

/// Outcome of an access decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
}

/// Decide whether the holder of `claims` may access account `requested_id`.
///
/// The claim carries an account *number*; the request names an internal *id*.
/// The number is resolved through the store and only the resolved id is
/// compared, so a claim never matches an id directly. Every failure path
/// yields [`Access::Deny`]; the reason is only traced.
pub async fn authorize(store: &dyn AccountStore, claims: &Claims, requested_id: DbId) -> Access {
    if claims.account_number <= 0 {
        tracing::debug!(requested_id, "access denied: non-positive account number claim");
        return Access::Deny;
    }

    let account = match store.get_by_account_number(claims.account_number).await {
        Ok(account) => account,
        Err(e) => {
            tracing::debug!(requested_id, error = %e, "access denied: claim did not resolve");
            return Access::Deny;
        }
    };

    if account.id != requested_id {
        tracing::debug!(
            requested_id,
            owner_id = account.id,
            "access denied: account does not own resource"
        );
        return Access::Deny;
    }

    Access::Allow
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::NewAccount;
    use crate::store::InMemoryAccountStore;

    async fn seeded_store() -> (InMemoryAccountStore, Vec<crate::account::Account>) {
        let store = InMemoryAccountStore::new();
        let mut accounts = Vec::new();
        for name in ["Alice", "Bob"] {
            let input = NewAccount {
                first_name: name.into(),
                last_name: "Smith".into(),
                secret_hash: "hash".into(),
            };
            accounts.push(store.create(&input).await.unwrap());
        }
        (store, accounts)
    }

    fn claims_for(account_number: i64) -> Claims {
        Claims {
            account_number,
            iat: 0,
            exp: i64::MAX,
        }
    }

    #[tokio::test]
    async fn owner_is_allowed() {
        let (store, accounts) = seeded_store().await;
        let alice = &accounts[0];

        let access = authorize(&store, &claims_for(alice.account_number), alice.id).await;
        assert_eq!(access, Access::Allow);
    }

    #[tokio::test]
    async fn other_existing_account_is_denied() {
        let (store, accounts) = seeded_store().await;
        let (alice, bob) = (&accounts[0], &accounts[1]);

        let access = authorize(&store, &claims_for(alice.account_number), bob.id).await;
        assert_eq!(access, Access::Deny);
    }

    #[tokio::test]
    async fn claim_equal_to_id_does_not_match_by_coincidence() {
        let (store, accounts) = seeded_store().await;
        let alice = &accounts[0];

        // A forged claim using the internal id instead of the account number.
        let access = authorize(&store, &claims_for(alice.id), alice.id).await;
        assert_eq!(access, Access::Deny);
    }

    #[tokio::test]
    async fn unknown_or_deleted_account_is_denied() {
        let (store, accounts) = seeded_store().await;
        let alice = &accounts[0];
        store.delete(alice.id).await.unwrap();

        let access = authorize(&store, &claims_for(alice.account_number), alice.id).await;
        assert_eq!(access, Access::Deny);
    }

    #[tokio::test]
    async fn non_positive_claim_is_denied() {
        let (store, _) = seeded_store().await;
        assert_eq!(authorize(&store, &claims_for(0), 1).await, Access::Deny);
        assert_eq!(authorize(&store, &claims_for(-5), 1).await, Access::Deny);
    }
}
