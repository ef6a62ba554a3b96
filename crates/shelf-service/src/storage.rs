//! Storage of uploaded objects.

use async_trait::async_trait;
use shelf_core::{ShelfError, ShelfResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where uploaded bytes are kept.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Writes `bytes` under `name` and returns the stored path.
    async fn put(&self, name: &str, bytes: &[u8]) -> ShelfResult<String>;

    /// Removes a stored object. Removing a missing object is not an error.
    async fn remove(&self, path: &str) -> ShelfResult<()>;
}

/// Stores objects as files under a root directory.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn put(&self, name: &str, bytes: &[u8]) -> ShelfResult<String> {
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            return Err(ShelfError::validation(format!("invalid object name '{name}'")));
        }

        tokio::fs::create_dir_all(&self.root).await?;
        let path = self.root.join(name);
        tokio::fs::write(&path, bytes).await?;

        debug!(path = %path.display(), size = bytes.len(), "Stored object");
        Ok(path.to_string_lossy().into_owned())
    }

    async fn remove(&self, path: &str) -> ShelfResult<()> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ShelfError::Storage(format!("Failed to remove {path}: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path().join("uploads"));

        let path = storage.put("a.png", b"png-bytes").await.unwrap();
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"png-bytes");

        storage.remove(&path).await.unwrap();
        assert!(!Path::new(&path).exists());
        storage.remove(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_rejects_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path());
        assert!(storage.put("../escape.png", b"x").await.is_err());
        assert!(storage.put("", b"x").await.is_err());
    }
}
