//! Configuration module
//!
//! Environment-driven configuration for ETL jobs: database connection
//! parameters and object-store access settings.

use std::env;
use std::path::Path;

use crate::paths::{self, ResolveOptions};
use crate::storage_types::StorageBackend;

const POSTGRES_PORT: u16 = 5432;
const POSTGRES_DB: &str = "app";
const MAX_CONNECTIONS: u32 = 5;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_REGION: &str = "us-east-1";

/// Postgres connection parameters
#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
    pub timeout_seconds: u64,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

/// Object store access settings
#[derive(Clone, Debug, Default)]
pub struct ObjectStoreConfig {
    pub region: String,
    /// Custom endpoint for S3-compatible providers (MinIO, etc.)
    pub endpoint: Option<String>,
}

/// ETL job configuration
#[derive(Clone, Debug)]
pub struct EtlConfig {
    pub environment: String,
    pub database: DatabaseConfig,
    pub object_store: ObjectStoreConfig,
}

impl EtlConfig {
    /// Read configuration from the process environment.
    ///
    /// Call [`load_dotenv`] first if settings live in a `.env` file.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let database = DatabaseConfig {
            host: required("POSTGRES_IP")?,
            port: parsed_or("POSTGRES_PORT", POSTGRES_PORT)?,
            user: required("POSTGRES_USER")?,
            password: required("POSTGRES_PASSWORD")?,
            database: env::var("POSTGRES_DB").unwrap_or_else(|_| POSTGRES_DB.to_string()),
            max_connections: parsed_or("DB_MAX_CONNECTIONS", MAX_CONNECTIONS)?,
            timeout_seconds: parsed_or("DB_TIMEOUT_SECONDS", CONNECTION_TIMEOUT_SECS)?,
        };

        let object_store = ObjectStoreConfig {
            region: env::var("S3_REGION")
                .or_else(|_| env::var("AWS_REGION"))
                .unwrap_or_else(|_| DEFAULT_REGION.to_string()),
            endpoint: env::var("S3_ENDPOINT").ok().filter(|s| !s.is_empty()),
        };

        let config = EtlConfig {
            environment,
            database,
            object_store,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let db = &self.database;
        if db.host.trim().is_empty() {
            return Err(anyhow::anyhow!("POSTGRES_IP must not be empty"));
        }
        if db.user.trim().is_empty() {
            return Err(anyhow::anyhow!("POSTGRES_USER must not be empty"));
        }
        if db.database.trim().is_empty() {
            return Err(anyhow::anyhow!("POSTGRES_DB must not be empty"));
        }
        if db.max_connections == 0 {
            return Err(anyhow::anyhow!("DB_MAX_CONNECTIONS must be at least 1"));
        }
        if let Some(endpoint) = &self.object_store.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(anyhow::anyhow!(
                    "S3_ENDPOINT must be an http(s) URL, got {:?}",
                    endpoint
                ));
            }
        }
        Ok(())
    }
}

fn required(key: &str) -> Result<String, anyhow::Error> {
    env::var(key).map_err(|_| anyhow::anyhow!("{} must be set", key))
}

/// Parse `key` if set, otherwise use `default`. A set but unparsable value is an error.
fn parsed_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T, anyhow::Error> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a valid number, got {:?}", key, raw)),
        Err(_) => Ok(default),
    }
}

/// Load the `.env` file resolved on `storage`, falling back to the usual
/// dotenv lookup from the working directory.
///
/// Returns the path that was loaded, if any. Variables already present in the
/// environment are not overridden.
pub fn load_dotenv(storage: StorageBackend) -> Result<Option<std::path::PathBuf>, anyhow::Error> {
    let env_path = paths::resolve_path([paths::ENV], &ResolveOptions::new(storage))?;
    load_dotenv_from(&env_path)
}

pub fn load_dotenv_from(env_path: &Path) -> Result<Option<std::path::PathBuf>, anyhow::Error> {
    if env_path.is_file() {
        dotenvy::from_path(env_path)
            .map_err(|e| anyhow::anyhow!("Failed to load {}: {}", env_path.display(), e))?;
        tracing::debug!(path = %env_path.display(), "Loaded environment file");
        return Ok(Some(env_path.to_path_buf()));
    }

    tracing::debug!(
        path = %env_path.display(),
        "Environment file not found, falling back to working directory"
    );
    Ok(dotenvy::dotenv().ok())
}
