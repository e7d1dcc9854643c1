//! Next Watch Storage Library
//!
//! Read access to datasets addressed by resolved locations. Each
//! [`StorageBackend`] has a reader:
//!
//! - **Container** / **Local**: [`LocalStorage`], rooted at the backend's root
//!   directory. Locations are absolute paths under that root.
//! - **ObjectStore**: [`S3Storage`]. Locations are `scheme://bucket/key` URIs.
//!
//! Use [`create_storage`] to pick the reader for a backend.

pub mod factory;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use nextwatch_core::StorageBackend;
#[cfg(feature = "storage-s3")]
pub use s3::{ObjectUri, S3Storage};
pub use traits::{Storage, StorageError, StorageResult};
