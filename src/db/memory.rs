//! In-memory document store.

use super::DocumentStore;
use crate::error::AppError;
use async_trait::async_trait;
use dashmap::DashMap;

/// Document store backed by a concurrent map. Contents are lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: DashMap<String, serde_json::Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn read(&self, key: &str) -> Result<Option<serde_json::Value>, AppError> {
        Ok(self.documents.get(key).map(|doc| doc.value().clone()))
    }

    async fn write(&self, key: &str, document: serde_json::Value) -> Result<(), AppError> {
        self.documents.insert(key.to_string(), document);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.documents.remove(key);
        Ok(())
    }
}
