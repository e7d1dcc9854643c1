use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use nextwatch_core::paths::storage_root;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Local filesystem reader, for the container and project-checkout backends
#[derive(Clone, Debug)]
pub struct LocalStorage {
    root: PathBuf,
    backend: StorageBackend,
}

impl LocalStorage {
    /// Reader rooted at the resolver's root for `backend`.
    ///
    /// Returns a `ConfigError` for [`StorageBackend::ObjectStore`], which has no
    /// filesystem root.
    pub fn new(backend: StorageBackend) -> StorageResult<Self> {
        if backend.is_remote() {
            return Err(StorageError::ConfigError(format!(
                "{} is not a filesystem backend",
                backend
            )));
        }
        Ok(Self::with_root(storage_root(backend), backend))
    }

    /// Reader rooted at an explicit directory.
    pub fn with_root(root: impl Into<PathBuf>, backend: StorageBackend) -> Self {
        LocalStorage {
            root: root.into(),
            backend,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Convert a location to a filesystem path, rejecting anything that
    /// escapes the root. Relative locations are taken relative to the root.
    fn location_to_path(&self, location: &str) -> StorageResult<PathBuf> {
        if location.is_empty() {
            return Err(StorageError::InvalidLocation(
                "Location must not be empty".to_string(),
            ));
        }

        let candidate = Path::new(location);
        if candidate
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(StorageError::InvalidLocation(format!(
                "Location contains '..': {}",
                location
            )));
        }

        let path = if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.root.join(candidate)
        };

        if path.strip_prefix(&self.root).is_err() {
            return Err(StorageError::InvalidLocation(format!(
                "{} is outside storage root {}",
                location,
                self.root.display()
            )));
        }

        Ok(path)
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn read(&self, location: &str) -> StorageResult<Bytes> {
        let path = self.location_to_path(location)?;
        let start = std::time::Instant::now();

        let data = fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound(path.display().to_string())
            } else {
                tracing::error!(
                    error = %e,
                    path = %path.display(),
                    "Local storage read failed"
                );
                StorageError::ReadFailed(format!("Failed to read {}: {}", path.display(), e))
            }
        })?;

        tracing::info!(
            backend = %self.backend,
            path = %path.display(),
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage read successful"
        );

        Ok(Bytes::from(data))
    }

    async fn exists(&self, location: &str) -> StorageResult<bool> {
        let path = self.location_to_path(location)?;
        Ok(fs::try_exists(&path).await?)
    }

    fn backend_type(&self) -> StorageBackend {
        self.backend
    }
}

#[cfg(all(test, feature = "storage-local"))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_local_storage_read() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("data").join("ratings.csv");
        std::fs::create_dir_all(file.parent().unwrap()).unwrap();
        std::fs::write(&file, b"userId\n1\n").unwrap();

        let storage = LocalStorage::with_root(dir.path(), StorageBackend::Local);

        let absolute = storage.read(file.to_str().unwrap()).await.unwrap();
        assert_eq!(&absolute[..], b"userId\n1\n");

        let relative = storage.read("data/ratings.csv").await.unwrap();
        assert_eq!(absolute, relative);
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::with_root(dir.path(), StorageBackend::Container);

        let result = storage.read("../../../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidLocation(_))));

        let result = storage.read("/etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidLocation(_))));

        let result = storage.exists("").await;
        assert!(matches!(result, Err(StorageError::InvalidLocation(_))));
    }

    #[tokio::test]
    async fn test_local_storage_read_missing() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::with_root(dir.path(), StorageBackend::Local);

        let result = storage.read("missing.csv").await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_local_storage_exists() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("present.csv"), b"x").unwrap();
        let storage = LocalStorage::with_root(dir.path(), StorageBackend::Local);

        assert!(storage.exists("present.csv").await.unwrap());
        assert!(!storage.exists("absent.csv").await.unwrap());
    }

    #[test]
    fn test_object_store_backend_rejected() {
        let result = LocalStorage::new(StorageBackend::ObjectStore);
        assert!(matches!(result, Err(StorageError::ConfigError(_))));
    }

    #[test]
    fn test_container_root() {
        let storage = LocalStorage::new(StorageBackend::Container).unwrap();
        assert_eq!(storage.root(), Path::new("/app"));
        assert_eq!(storage.backend_type(), StorageBackend::Container);
    }
}
