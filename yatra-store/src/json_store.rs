use std::path::PathBuf;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use yatra_ledger::{AccountsDocument, StateStore, StoreError, TicketsDocument};

/// File name of the accounts document
pub const ACCOUNTS_DOCUMENT: &str = "users.json";
/// File name of the tickets document
pub const TICKETS_DOCUMENT: &str = "railway_data.json";

/// Flat-JSON implementation of [`StateStore`].
///
/// Each document is one file, rewritten in full on every save via a
/// temp-file rename. A missing or malformed file loads as an empty
/// document.
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    async fn load<T: DeserializeOwned + Default>(&self, document: &str) -> Result<T, StoreError> {
        let path = self.data_dir.join(document);
        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
            Err(err) => {
                return Err(StoreError::Io {
                    document: document.to_string(),
                    message: err.to_string(),
                })
            }
        };

        match serde_json::from_slice(&raw) {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::warn!(document, error = %err, "malformed document, loading as empty");
                Ok(T::default())
            }
        }
    }

    async fn save<T: Serialize>(&self, document: &str, value: &T) -> Result<(), StoreError> {
        let io_error = |err: std::io::Error| StoreError::Io {
            document: document.to_string(),
            message: err.to_string(),
        };

        tokio::fs::create_dir_all(&self.data_dir).await.map_err(io_error)?;

        let encoded = serde_json::to_vec_pretty(value).map_err(|err| StoreError::Encode {
            document: document.to_string(),
            message: err.to_string(),
        })?;

        // full rewrite through a temp file so a crash never truncates the live document
        let path = self.data_dir.join(document);
        let tmp_path = self.data_dir.join(format!("{document}.tmp"));
        tokio::fs::write(&tmp_path, &encoded).await.map_err(io_error)?;
        tokio::fs::rename(&tmp_path, &path).await.map_err(io_error)?;
        Ok(())
    }
}

#[async_trait]
impl StateStore for JsonFileStore {
    async fn load_accounts(&self) -> Result<AccountsDocument, StoreError> {
        self.load(ACCOUNTS_DOCUMENT).await
    }

    async fn save_accounts(&self, accounts: &AccountsDocument) -> Result<(), StoreError> {
        self.save(ACCOUNTS_DOCUMENT, accounts).await
    }

    async fn load_tickets(&self) -> Result<TicketsDocument, StoreError> {
        self.load(TICKETS_DOCUMENT).await
    }

    async fn save_tickets(&self, tickets: &TicketsDocument) -> Result<(), StoreError> {
        self.save(TICKETS_DOCUMENT, tickets).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yatra_core::Account;

    #[tokio::test]
    async fn test_missing_documents_load_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        assert!(store.load_accounts().await.unwrap().is_empty());
        assert!(store.load_tickets().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_accounts_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        let mut accounts = AccountsDocument::new();
        accounts.insert(
            "a@b.com".to_string(),
            Account {
                password_hash: "$2b$12$hash".to_string(),
                bookings: vec!["1234567890123".to_string()],
            },
        );
        store.save_accounts(&accounts).await.unwrap();

        let loaded = store.load_accounts().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded["a@b.com"].bookings, vec!["1234567890123"]);

        // the credential key in the document stays `password`
        let raw = std::fs::read_to_string(dir.path().join(ACCOUNTS_DOCUMENT)).unwrap();
        assert!(raw.contains("\"password\""));
    }

    #[tokio::test]
    async fn test_malformed_document_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(TICKETS_DOCUMENT), b"{ not json").unwrap();
        let store = JsonFileStore::new(dir.path());

        assert!(store.load_tickets().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_overwrites_whole_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        let mut accounts = AccountsDocument::new();
        accounts.insert(
            "a@b.com".to_string(),
            Account {
                password_hash: "hash".to_string(),
                bookings: Vec::new(),
            },
        );
        store.save_accounts(&accounts).await.unwrap();

        store.save_accounts(&AccountsDocument::new()).await.unwrap();
        assert!(store.load_accounts().await.unwrap().is_empty());
    }
}
