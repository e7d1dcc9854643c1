//! Error types module
//!
//! `AppError` unifies the failures an ETL job can surface: database, storage,
//! dataset parsing, configuration and input validation.
//!
//! The `Database` variant wraps `sqlx::Error` only when the `sqlx` feature is on;
//! without it the variant carries the rendered message instead.

use std::io;

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

use crate::paths::PathError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected failures such as bad input
    Debug,
    /// Recoverable issues
    Warn,
    /// Unexpected failures
    Error,
}

/// Self-description of an error for logs and CLI output.
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "DATABASE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether retrying the job may succeed
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the operator
    fn suggested_action(&self) -> Option<&'static str>;

    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<PathError> for AppError {
    fn from(err: PathError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

/// (error_code, recoverable, suggested_action, log_level) per variant.
fn app_error_static_metadata(err: &AppError) -> (&'static str, bool, Option<&'static str>, LogLevel) {
    match err {
        AppError::Database(_) => (
            "DATABASE_ERROR",
            true,
            Some("Check POSTGRES_* settings and that the database is reachable"),
            LogLevel::Error,
        ),
        AppError::Storage(_) => (
            "STORAGE_ERROR",
            true,
            Some("Check that the dataset exists and credentials are valid"),
            LogLevel::Error,
        ),
        AppError::Dataset(_) => (
            "DATASET_ERROR",
            false,
            Some("Check the dataset header and column values"),
            LogLevel::Warn,
        ),
        AppError::InvalidInput(_) => (
            "INVALID_INPUT",
            false,
            Some("Check command-line arguments and try again"),
            LogLevel::Debug,
        ),
        AppError::Config(_) => (
            "CONFIG_ERROR",
            false,
            Some("Check the environment and .env file"),
            LogLevel::Warn,
        ),
        AppError::Internal(_) | AppError::InternalWithSource { .. } => {
            ("INTERNAL_ERROR", true, None, LogLevel::Error)
        }
    }
}

impl AppError {
    /// Message followed by the source chain, one cause per line.
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).1
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_database() {
        #[cfg(feature = "sqlx")]
        let err = AppError::from(sqlx::Error::PoolClosed);
        #[cfg(not(feature = "sqlx"))]
        let err = AppError::Database("pool closed".to_string());
        assert_eq!(err.error_code(), "DATABASE_ERROR");
        assert!(err.is_recoverable());
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_error_metadata_dataset() {
        let err = AppError::Dataset("column userId not found".to_string());
        assert_eq!(err.error_code(), "DATASET_ERROR");
        assert!(!err.is_recoverable());
        assert_eq!(err.log_level(), LogLevel::Warn);
    }

    #[test]
    fn test_path_error_maps_to_invalid_input() {
        let err = AppError::from(PathError::InvalidSuffix("csv".to_string()));
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(err.to_string().contains("csv"));
    }

    #[test]
    fn test_detailed_message_includes_chain() {
        let inner = anyhow::anyhow!("connection refused").context("connect to postgres");
        let err = AppError::from(inner);
        let details = err.detailed_message();
        assert!(details.starts_with("Internal error with source"));
        assert!(details.contains("Caused by: connect to postgres"));
    }
}
