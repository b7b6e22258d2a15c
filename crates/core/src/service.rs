//! Inbound account operations composed from store, hasher, and tokens.

use std::sync::Arc;

use validator::Validate;

use crate::account::{Account, CreateAccountRequest, LoginResponse, NewAccount};
use crate::auth::guard::{self, Access};
use crate::auth::password::{dummy_hash, hash_password, validate_secret, verify_password};
use crate::auth::token::{Claims, TokenConfig, TokenIssuer, TokenVerifier};
use crate::error::{AuthError, CoreError};
use crate::store::AccountStore;
use crate::types::{AccountNumber, DbId};

/// Entry point for login, account lifecycle, and per-request authorization.
///
/// Cheap to clone; the store is shared behind an `Arc`.
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn AccountStore>,
    issuer: TokenIssuer,
    verifier: TokenVerifier,
}

impl AccountService {
    pub fn new(store: Arc<dyn AccountStore>, tokens: &TokenConfig) -> Self {
        Self {
            store,
            issuer: TokenIssuer::new(tokens),
            verifier: TokenVerifier::new(tokens),
        }
    }

    /// Validate the request, hash the password, and persist the account.
    pub async fn create_account(&self, input: &CreateAccountRequest) -> Result<Account, CoreError> {
        input
            .validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;
        validate_secret(&input.password)?;

        let password = input.password.clone();
        let secret_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| CoreError::Internal(format!("hashing task failed: {e}")))??;

        let account = self
            .store
            .create(&NewAccount {
                first_name: input.first_name.clone(),
                last_name: input.last_name.clone(),
                secret_hash,
            })
            .await?;

        tracing::info!(
            account_id = account.id,
            account_number = account.account_number,
            "Account created"
        );
        Ok(account)
    }

    /// Check credentials and issue a token.
    ///
    /// An unknown account number and a wrong password produce the same
    /// [`AuthError::InvalidCredentials`] after the same amount of hashing work.
    pub async fn login(
        &self,
        account_number: AccountNumber,
        password: &str,
    ) -> Result<LoginResponse, CoreError> {
        let account = match self.store.get_by_account_number(account_number).await {
            Ok(account) => Some(account),
            Err(CoreError::NotFound { .. }) => None,
            Err(e) => return Err(e),
        };

        let password = password.to_owned();
        let stored_hash = account.as_ref().map(|a| a.secret_hash.clone());
        let valid = tokio::task::spawn_blocking(move || match stored_hash {
            Some(hash) => verify_password(&password, &hash),
            None => verify_password(&password, dummy_hash()?).map(|_| false),
        })
        .await
        .map_err(|e| CoreError::Internal(format!("verification task failed: {e}")))??;

        let account = match account {
            Some(account) if valid => account,
            Some(_) => {
                tracing::debug!(account_number, "login rejected: wrong password");
                return Err(AuthError::InvalidCredentials.into());
            }
            None => {
                tracing::debug!(account_number, "login rejected: unknown account number");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        let token = self.issuer.issue(&account)?;
        tracing::info!(account_id = account.id, "Login succeeded");

        Ok(LoginResponse {
            account_number: account.account_number,
            token,
        })
    }

    pub async fn get_account(&self, id: DbId) -> Result<Account, CoreError> {
        self.store.get_by_id(id).await
    }

    pub async fn delete_account(&self, id: DbId) -> Result<(), CoreError> {
        self.store.delete(id).await?;
        tracing::info!(account_id = id, "Account deleted");
        Ok(())
    }

    /// Verify `token` and check that its holder owns account `requested_id`.
    ///
    /// Token failures surface as [`CoreError::Auth`]; an ownership denial as
    /// [`CoreError::Forbidden`]. Both must be rendered identically to clients.
    pub async fn authorize(&self, token: &str, requested_id: DbId) -> Result<Claims, CoreError> {
        let claims = self.verifier.verify(token).map_err(|e| {
            tracing::debug!(requested_id, error = %e, "access denied: token rejected");
            CoreError::Auth(e)
        })?;

        match guard::authorize(self.store.as_ref(), &claims, requested_id).await {
            Access::Allow => Ok(claims),
            Access::Deny => Err(CoreError::Forbidden("permission denied".into())),
        }
    }
}
