// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON-file document store.
//!
//! Each document lives in `<dir>/<key>.json`. Writes go to a sibling temp
//! file which is then renamed over the target, so readers see either the old
//! or the new document and never a torn one.

use super::DocumentStore;
use crate::error::AppError;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Document store backed by one JSON file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn read(&self, key: &str) -> Result<Option<serde_json::Value>, AppError> {
        let path = self.path_for(key);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::Storage(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| AppError::Storage(format!("Invalid JSON in {}: {}", path.display(), e)))
    }

    async fn write(&self, key: &str, document: serde_json::Value) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            AppError::Storage(format!(
                "Failed to create data directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        let path = self.path_for(key);
        let tmp_path = self.dir.join(format!("{}.json.tmp", key));

        let bytes = serde_json::to_vec_pretty(&document)
            .map_err(|e| AppError::Storage(format!("Failed to encode {}: {}", key, e)))?;

        tokio::fs::write(&tmp_path, &bytes).await.map_err(|e| {
            AppError::Storage(format!("Failed to write {}: {}", tmp_path.display(), e))
        })?;

        tokio::fs::rename(&tmp_path, &path).await.map_err(|e| {
            AppError::Storage(format!("Failed to replace {}: {}", path.display(), e))
        })?;

        tracing::debug!(path = %path.display(), "Document written");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        let path = self.path_for(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Storage(format!(
                "Failed to delete {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_read_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.read("tokens").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_replaces_whole_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));

        store.write("doc", json!({"a": 1, "b": 2})).await.unwrap();
        store.write("doc", json!({"c": 3})).await.unwrap();

        assert_eq!(store.read("doc").await.unwrap(), Some(json!({"c": 3})));
        assert!(!dir.path().join("nested/doc.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.write("doc", json!({})).await.unwrap();
        store.delete("doc").await.unwrap();
        store.delete("doc").await.unwrap();

        assert!(store.read("doc").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_garbage_file_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("doc.json"), b"{not json").unwrap();
        let store = FileStore::new(dir.path());

        let err = store.read("doc").await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
    }
}
