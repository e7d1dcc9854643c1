//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for nextwatch_core::AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConfigError(msg) => nextwatch_core::AppError::Config(msg),
            other => nextwatch_core::AppError::Storage(other.to_string()),
        }
    }
}

/// Storage abstraction trait
///
/// Locations are the string form of a resolved location on the reader's
/// backend: a filesystem path for local readers, a `scheme://bucket/key` URI
/// for object stores.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Read the whole object at `location`.
    async fn read(&self, location: &str) -> StorageResult<Bytes>;

    /// Check if an object exists at `location`.
    async fn exists(&self, location: &str) -> StorageResult<bool>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
