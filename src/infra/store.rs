//! Filesystem-backed JSON document store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tokio::fs;

use crate::domain::documents::Document;

/// Errors raised while reading or writing a whole document.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read `{document}`: {source}")]
    Read {
        document: Document,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse `{document}`: {source}")]
    Parse {
        document: Document,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode `{document}`: {source}")]
    Encode {
        document: Document,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write `{document}`: {source}")]
    Write {
        document: Document,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub fn document(&self) -> Document {
        match self {
            StoreError::Read { document, .. }
            | StoreError::Parse { document, .. }
            | StoreError::Encode { document, .. }
            | StoreError::Write { document, .. } => *document,
        }
    }
}

/// Description of the backing storage for admin diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageInfo {
    pub mode: &'static str,
    pub configured: bool,
}

/// Whole-document persistence contract.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read and parse the named document.
    async fn read(&self, document: Document) -> Result<Value, StoreError>;

    /// Replace the named document, creating parent directories as needed.
    async fn write(&self, document: Document, data: &Value) -> Result<(), StoreError>;

    fn storage_info(&self) -> StorageInfo;
}

/// One pretty-printed JSON file per document under `root`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, document: Document) -> PathBuf {
        self.root.join(document.file_name())
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn read(&self, document: Document) -> Result<Value, StoreError> {
        let path = self.path_for(document);
        let raw = fs::read_to_string(&path)
            .await
            .map_err(|source| StoreError::Read { document, source })?;
        serde_json::from_str(&raw).map_err(|source| StoreError::Parse { document, source })
    }

    async fn write(&self, document: Document, data: &Value) -> Result<(), StoreError> {
        let path = self.path_for(document);
        let encoded = serde_json::to_string_pretty(data)
            .map_err(|source| StoreError::Encode { document, source })?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| StoreError::Write { document, source })?;
        }

        // Readers never observe a partially written document.
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, encoded)
            .await
            .map_err(|source| StoreError::Write { document, source })?;
        if let Err(source) = fs::rename(&staging, &path).await {
            let _ = fs::remove_file(&staging).await;
            return Err(StoreError::Write { document, source });
        }

        Ok(())
    }

    fn storage_info(&self) -> StorageInfo {
        StorageInfo {
            mode: "Local File System",
            configured: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn write_creates_directory_and_pretty_prints() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path().join("nested").join("data"));

        store
            .write(Document::Ads, &json!([{ "id": "a1" }]))
            .await
            .expect("write succeeds");

        let raw = std::fs::read_to_string(store.path_for(Document::Ads)).expect("file exists");
        assert_eq!(raw, "[\n  {\n    \"id\": \"a1\"\n  }\n]");
        assert_eq!(
            store.read(Document::Ads).await.expect("read succeeds"),
            json!([{ "id": "a1" }])
        );
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path());
        let err = store.read(Document::Games).await.expect_err("missing file");
        assert!(matches!(err, StoreError::Read { .. }));
        assert_eq!(err.document(), Document::Games);
    }

    #[tokio::test]
    async fn malformed_json_is_a_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path());
        std::fs::write(store.path_for(Document::Games), "[{").expect("seed file");
        let err = store.read(Document::Games).await.expect_err("corrupt file");
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[tokio::test]
    async fn write_into_a_file_path_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").expect("seed file");
        let store = FileStore::new(blocker.join("data"));

        let err = store
            .write(Document::Games, &json!([]))
            .await
            .expect_err("parent is a file");
        assert!(matches!(err, StoreError::Write { .. }));
    }
}
