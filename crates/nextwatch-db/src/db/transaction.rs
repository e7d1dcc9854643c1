//! Database transaction utilities
//!
//! Multi-statement writes (drop, recreate, insert) run inside one transaction
//! so a failed load leaves the previous table in place.

use anyhow::{Context, Result};
use sqlx::{PgPool, Postgres, Transaction};
use std::ops::{Deref, DerefMut};

/// A database transaction wrapper with explicit commit/rollback
///
/// # Example
///
/// ```ignore
/// use nextwatch_db::TransactionGuard;
///
/// async fn example(pool: &sqlx::PgPool) -> anyhow::Result<()> {
///     let mut tx = TransactionGuard::begin(pool).await?;
///     sqlx::query("TRUNCATE users").execute(&mut **tx).await?;
///     tx.commit().await?;
///     Ok(())
/// }
/// ```
pub struct TransactionGuard<'a> {
    transaction: Option<Transaction<'a, Postgres>>,
}

impl<'a> TransactionGuard<'a> {
    /// Begin a new database transaction
    pub async fn begin(pool: &'a PgPool) -> Result<Self> {
        let transaction = pool
            .begin()
            .await
            .context("Failed to begin database transaction")?;

        Ok(Self {
            transaction: Some(transaction),
        })
    }

    /// Commit the transaction
    pub async fn commit(mut self) -> Result<()> {
        if let Some(tx) = self.transaction.take() {
            tx.commit()
                .await
                .context("Failed to commit database transaction")?;
        }
        Ok(())
    }

    /// Rollback the transaction
    pub async fn rollback(mut self) -> Result<()> {
        if let Some(tx) = self.transaction.take() {
            tx.rollback()
                .await
                .context("Failed to rollback database transaction")?;
        }
        Ok(())
    }
}

impl<'a> Deref for TransactionGuard<'a> {
    type Target = Transaction<'a, Postgres>;

    fn deref(&self) -> &Self::Target {
        self.transaction
            .as_ref()
            .expect("Transaction was already committed or rolled back")
    }
}

impl<'a> DerefMut for TransactionGuard<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.transaction
            .as_mut()
            .expect("Transaction was already committed or rolled back")
    }
}

impl<'a> Drop for TransactionGuard<'a> {
    fn drop(&mut self) {
        // sqlx rolls the transaction back when it is dropped; just make it visible.
        if self.transaction.is_some() {
            tracing::warn!(
                "Transaction was dropped without explicit commit or rollback - rolling back"
            );
        }
    }
}
