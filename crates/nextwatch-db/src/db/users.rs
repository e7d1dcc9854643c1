use crate::db::transaction::TransactionGuard;
use nextwatch_core::AppError;
use sqlx::PgPool;

const MAX_IDENT_LEN: usize = 63;

/// Validate `name` as a plain SQL identifier and return it double-quoted.
///
/// Only `[A-Za-z_][A-Za-z0-9_]*` up to 63 bytes is accepted; quoting preserves
/// case, so `userId` stays `userId`.
pub fn quote_ident(name: &str) -> Result<String, AppError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if !valid_start || !valid_rest || name.len() > MAX_IDENT_LEN {
        return Err(AppError::InvalidInput(format!(
            "Invalid SQL identifier: {:?}",
            name
        )));
    }
    Ok(format!("\"{}\"", name))
}

/// Repository for the single-column users table
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
    table: String,
    column: String,
}

impl UserRepository {
    /// Repository writing `column` of `table`. Both names are validated here.
    pub fn new(pool: PgPool, table: &str, column: &str) -> Result<Self, AppError> {
        Ok(Self {
            pool,
            table: quote_ident(table)?,
            column: quote_ident(column)?,
        })
    }

    /// Replace the table with exactly `user_ids`.
    ///
    /// Drops and recreates the table, then bulk-inserts, all in one transaction.
    /// Returns the number of rows inserted.
    #[tracing::instrument(skip(self, user_ids), fields(db.table = %self.table, db.operation = "overwrite", rows = user_ids.len()))]
    pub async fn overwrite(&self, user_ids: &[i64]) -> Result<u64, AppError> {
        let mut tx = TransactionGuard::begin(&self.pool).await?;

        let inserted = match self.replace_rows(&mut tx, user_ids).await {
            Ok(inserted) => inserted,
            Err(e) => {
                tracing::error!(error = %e, "Overwrite failed, rolling back");
                tx.rollback().await?;
                return Err(e.into());
            }
        };

        tx.commit().await?;

        tracing::info!(rows = inserted, "Users table overwritten");
        Ok(inserted)
    }

    async fn replace_rows(
        &self,
        tx: &mut TransactionGuard<'_>,
        user_ids: &[i64],
    ) -> Result<u64, sqlx::Error> {
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", self.table))
            .execute(&mut ***tx)
            .await?;

        sqlx::query(&format!(
            "CREATE TABLE {} ({} BIGINT)",
            self.table, self.column
        ))
        .execute(&mut ***tx)
        .await?;

        let result = sqlx::query(&format!(
            "INSERT INTO {} ({}) SELECT * FROM UNNEST($1::BIGINT[])",
            self.table, self.column
        ))
        .bind(user_ids)
        .execute(&mut ***tx)
        .await?;

        Ok(result.rows_affected())
    }
}
