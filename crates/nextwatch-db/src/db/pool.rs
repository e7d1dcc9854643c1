use anyhow::{Context, Result};
use nextwatch_core::DatabaseConfig;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::time::Duration;

const APPLICATION_NAME: &str = "nextwatch";

/// Connection options for `config`. Credentials are passed as discrete fields,
/// so passwords never need URL escaping.
pub fn connect_options(config: &DatabaseConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.database)
        .application_name(APPLICATION_NAME)
}

/// Open a connection pool to the configured database
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool> {
    tracing::info!(
        host = %config.host,
        port = config.port,
        database = %config.database,
        "Connecting to database..."
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.timeout_seconds))
        .idle_timeout(Duration::from_secs(600))
        .connect_with(connect_options(config))
        .await
        .with_context(|| {
            format!(
                "Failed to connect to postgres at {}:{}/{}",
                config.host, config.port, config.database
            )
        })?;

    tracing::info!(
        max_connections = config.max_connections,
        "Database connected successfully"
    );

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_carry_config_fields() {
        let config = DatabaseConfig {
            host: "db.internal".to_string(),
            port: 6543,
            user: "etl".to_string(),
            password: "p@ss/word".to_string(),
            database: "app".to_string(),
            max_connections: 2,
            timeout_seconds: 5,
        };

        let options = connect_options(&config);
        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_username(), "etl");
        assert_eq!(options.get_database(), Some("app"));
    }
}
