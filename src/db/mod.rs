//! Storage layer.
//!
//! The pipeline only ever reads or replaces whole documents, so any backend
//! that can do that atomically can sit behind [`DocumentStore`].

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::AppError;
use crate::models::{SyncStore, TokenTriple};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// Document keys as constants.
pub mod documents {
    pub const TOKENS: &str = "tokens";
    pub const SYNC_STORE: &str = "sync_store";
}

/// Whole-document storage port.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read a document, `None` if it has never been written.
    async fn read(&self, key: &str) -> Result<Option<serde_json::Value>, AppError>;

    /// Replace a document atomically.
    async fn write(&self, key: &str, document: serde_json::Value) -> Result<(), AppError>;

    /// Remove a document. Removing a missing document is not an error.
    async fn delete(&self, key: &str) -> Result<(), AppError>;
}

/// Typed access to the token and sync-store documents.
#[derive(Clone)]
pub struct SyncDb {
    store: Arc<dyn DocumentStore>,
}

impl SyncDb {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// JSON files under `dir`.
    pub fn file(dir: impl Into<std::path::PathBuf>) -> Self {
        Self::new(Arc::new(FileStore::new(dir)))
    }

    /// Process-local store (tests and throwaway runs).
    pub fn memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    // ─── Token Operations ────────────────────────────────────────

    pub async fn get_tokens(&self) -> Result<Option<TokenTriple>, AppError> {
        self.get(documents::TOKENS).await
    }

    pub async fn set_tokens(&self, tokens: &TokenTriple) -> Result<(), AppError> {
        self.set(documents::TOKENS, tokens).await
    }

    /// Delete tokens (for disconnect).
    pub async fn delete_tokens(&self) -> Result<(), AppError> {
        self.store.delete(documents::TOKENS).await
    }

    // ─── Sync Store Operations ───────────────────────────────────

    /// Get the sync store, empty if nothing has been synced yet.
    pub async fn get_sync_store(&self) -> Result<SyncStore, AppError> {
        Ok(self.get(documents::SYNC_STORE).await?.unwrap_or_default())
    }

    pub async fn set_sync_store(&self, store: &SyncStore) -> Result<(), AppError> {
        self.set(documents::SYNC_STORE, store).await
    }

    async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, AppError> {
        self.store
            .read(key)
            .await?
            .map(|value| {
                serde_json::from_value(value)
                    .map_err(|e| AppError::Storage(format!("Corrupt document '{}': {}", key, e)))
            })
            .transpose()
    }

    async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), AppError> {
        let document = serde_json::to_value(value)
            .map_err(|e| AppError::Storage(format!("Failed to encode '{}': {}", key, e)))?;
        self.store.write(key, document).await
    }
}
