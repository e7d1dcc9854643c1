//! Next Watch CLI support: shared setup for the binaries and the
//! populate-users job.

pub mod ingest;
pub mod populate;

use nextwatch_core::{AppError, ErrorMetadata, LogLevel};

/// Initialize tracing for CLI binaries.
///
/// Logs go to stderr; stdout carries only command output.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// Log `err` at the level its metadata asks for.
pub fn log_app_error(err: &AppError) {
    let details = err.detailed_message();
    let action = err.suggested_action().unwrap_or("");
    match err.log_level() {
        LogLevel::Debug => {
            tracing::debug!(code = err.error_code(), action, "{}", details)
        }
        LogLevel::Warn => {
            tracing::warn!(code = err.error_code(), action, "{}", details)
        }
        LogLevel::Error => {
            tracing::error!(
                code = err.error_code(),
                recoverable = err.is_recoverable(),
                action,
                "{}",
                details
            )
        }
    }
}
