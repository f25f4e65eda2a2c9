use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A registered account and the tickets it owns.
///
/// Serialized field names match the accounts document: the credential is
/// stored under `password` even though it always holds a bcrypt hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "password")]
    pub password_hash: String,
    #[serde(default)]
    pub bookings: Vec<String>,
}

/// In-memory account registry keyed by normalized email
pub struct AccountStore {
    accounts: HashMap<String, Account>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
        }
    }

    /// Rehydrate from a loaded accounts document
    pub fn from_accounts(accounts: HashMap<String, Account>) -> Self {
        Self { accounts }
    }

    /// Snapshot for whole-document persistence
    pub fn accounts(&self) -> &HashMap<String, Account> {
        &self.accounts
    }

    /// Create a new account from an already-hashed credential
    pub fn register(&mut self, email: &str, password_hash: &str) -> Result<&Account, IdentityError> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(IdentityError::InvalidEmail(email));
        }
        if self.accounts.contains_key(&email) {
            return Err(IdentityError::AlreadyExists(email));
        }

        Ok(self.accounts.entry(email).or_insert(Account {
            password_hash: password_hash.to_string(),
            bookings: Vec::new(),
        }))
    }

    /// Drop an account; only used to unwind a registration whose persist failed
    pub fn remove(&mut self, email: &str) -> Option<Account> {
        self.accounts.remove(&normalize_email(email))
    }

    /// Used by the login flow to short-circuit OTP issuance for unknown accounts
    pub fn credential_exists(&self, email: &str) -> bool {
        self.accounts.contains_key(&normalize_email(email))
    }

    pub fn get(&self, email: &str) -> Option<&Account> {
        self.accounts.get(&normalize_email(email))
    }

    /// Append a PNR to the account's owned-ticket list
    pub fn append_ticket(&mut self, email: &str, pnr: &str) -> Result<(), IdentityError> {
        let account = self.get_mut(email)?;
        account.bookings.push(pnr.to_string());
        Ok(())
    }

    /// Remove a PNR from the owned-ticket list; an absent PNR is not an error
    pub fn remove_ticket(&mut self, email: &str, pnr: &str) -> Result<(), IdentityError> {
        let account = self.get_mut(email)?;
        account.bookings.retain(|owned| owned != pnr);
        Ok(())
    }

    /// Empty the owned-ticket list, returning the PNRs that were removed
    pub fn clear_tickets(&mut self, email: &str) -> Result<Vec<String>, IdentityError> {
        let account = self.get_mut(email)?;
        Ok(std::mem::take(&mut account.bookings))
    }

    fn get_mut(&mut self, email: &str) -> Result<&mut Account, IdentityError> {
        let email = normalize_email(email);
        self.accounts
            .get_mut(&email)
            .ok_or(IdentityError::NotFound(email))
    }
}

impl Default for AccountStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Emails are compared case-insensitively and with surrounding whitespace stripped
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Local part, single `@`, at least one `.` in the domain
pub fn is_valid_email(email: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| Regex::new(r"^[\w.-]+@[\w.-]+\.\w+$").expect("email pattern"));
    pattern.is_match(email)
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Account already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Account not found: {0}")]
    NotFound(String),
}
