#[cfg(feature = "storage-local")]
use crate::LocalStorage;
#[cfg(feature = "storage-s3")]
use crate::S3Storage;
use crate::{Storage, StorageBackend, StorageError, StorageResult};
use nextwatch_core::ObjectStoreConfig;
use std::sync::Arc;

/// Create the reader for `backend`
pub fn create_storage(
    backend: StorageBackend,
    object_store: &ObjectStoreConfig,
) -> StorageResult<Arc<dyn Storage>> {
    match backend {
        #[cfg(feature = "storage-s3")]
        StorageBackend::ObjectStore => {
            if object_store.region.is_empty() {
                return Err(StorageError::ConfigError(
                    "S3_REGION or AWS_REGION not configured".to_string(),
                ));
            }
            Ok(Arc::new(S3Storage::from_config(object_store)))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::ObjectStore => Err(StorageError::ConfigError(
            "Object store backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Container | StorageBackend::Local => {
            Ok(Arc::new(LocalStorage::new(backend)?))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Container | StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}
