//! Account entity and DTOs.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{AccountNumber, DbId, Timestamp};

/// Full account record as held by an [`AccountStore`](crate::store::AccountStore).
///
/// `secret_hash` is skipped during serialization and redacted from `Debug`
/// output, so an `Account` can be returned from handlers and traced safely.
#[derive(Clone, Serialize)]
pub struct Account {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub account_number: AccountNumber,
    #[serde(skip)]
    pub secret_hash: String,
    pub balance: f64,
    pub created_at: Timestamp,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("account_number", &self.account_number)
            .field("secret_hash", &"<redacted>")
            .field("balance", &self.balance)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Input for [`AccountStore::create`](crate::store::AccountStore::create).
///
/// Carries no id or account number: both are assigned by the store.
#[derive(Clone)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub secret_hash: String,
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("secret_hash", &"<redacted>")
            .finish()
    }
}

/// Inbound request to open an account. The password is plaintext until the
/// service hashes it.
#[derive(Clone, Deserialize, Validate)]
pub struct CreateAccountRequest {
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
    pub password: String,
}

impl fmt::Debug for CreateAccountRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateAccountRequest")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Inbound login credentials.
#[derive(Clone, Deserialize)]
pub struct LoginRequest {
    pub account_number: AccountNumber,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("account_number", &self.account_number)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login: the caller's account number and a fresh bearer token.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub account_number: AccountNumber,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Account {
        Account {
            id: 1,
            first_name: "Alice".into(),
            last_name: "Smith".into(),
            account_number: 100_000_000,
            secret_hash: "$argon2id$v=19$not-a-real-hash".into(),
            balance: 0.0,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn serialization_omits_secret_hash() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("secret_hash").is_none());
        assert_eq!(json["account_number"], 100_000_000);
        assert_eq!(json["first_name"], "Alice");
    }

    #[test]
    fn debug_redacts_secret_hash() {
        let rendered = format!("{:?}", sample());
        assert!(!rendered.contains("argon2id"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn create_request_rejects_empty_and_long_names() {
        let mut input = CreateAccountRequest {
            first_name: "Alice".into(),
            last_name: "Smith".into(),
            password: "s3cr3t".into(),
        };
        assert!(input.validate().is_ok());

        input.first_name.clear();
        assert!(input.validate().is_err());

        input.first_name = "a".repeat(51);
        assert!(input.validate().is_err());
    }

    #[test]
    fn request_debug_hides_password() {
        let login = LoginRequest {
            account_number: 1,
            password: "s3cr3t".into(),
        };
        assert!(!format!("{login:?}").contains("s3cr3t"));
    }
}
