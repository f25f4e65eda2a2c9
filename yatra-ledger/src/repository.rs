use std::collections::HashMap;

use async_trait::async_trait;
use yatra_core::Account;

use crate::models::Ticket;

/// The accounts document: email → account record
pub type AccountsDocument = HashMap<String, Account>;

/// The tickets document: PNR → ticket record
pub type TicketsDocument = HashMap<String, Ticket>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O failure on document {document}: {message}")]
    Io { document: String, message: String },

    #[error("Could not encode document {document}: {message}")]
    Encode { document: String, message: String },
}

/// Persistence collaborator.
///
/// Documents are loaded and rewritten wholesale; there is no partial-write
/// contract. Implementations live in `yatra-store`.
#[async_trait]
pub trait StateStore: Send + Sync {
    async fn load_accounts(&self) -> Result<AccountsDocument, StoreError>;

    async fn save_accounts(&self, accounts: &AccountsDocument) -> Result<(), StoreError>;

    async fn load_tickets(&self) -> Result<TicketsDocument, StoreError>;

    async fn save_tickets(&self, tickets: &TicketsDocument) -> Result<(), StoreError>;
}
