//! Next Watch Core Library
//!
//! Storage backend types, path resolution, the dataset catalog, configuration
//! and error types shared by the Next Watch data tooling.

pub mod catalog;
pub mod config;
pub mod error;
pub mod paths;
pub mod storage_types;

// Re-export commonly used types
pub use catalog::{Dataset, DatasetType, FileFormat, Source};
pub use config::{load_dotenv, DatabaseConfig, EtlConfig, ObjectStoreConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use paths::{resolve, resolve_path, resolve_string, Location, PathError, ResolveOptions};
pub use storage_types::{Protocol, StorageBackend};
