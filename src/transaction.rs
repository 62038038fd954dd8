//! Transactional execution.
//!
//! A [`Transaction`] owns one pooled connection from `BEGIN` until
//! `COMMIT`/`ROLLBACK`; every operation issued through it runs on that
//! connection, so a multi-statement unit of work is atomic. The handle moves
//! through `active → (committed | rolled back)`: `commit` and `rollback`
//! consume it, which makes use-after-completion — and nesting a transaction
//! inside itself — a compile error rather than a runtime one. Dropping an
//! active handle (early return, panic) rolls back asynchronously so a
//! half-done transaction can never leak back to the pool.

use async_trait::async_trait;
use futures_util::future::BoxFuture;

use crate::error::SqlComposeError;
use crate::executor::SqlExecutor;
use crate::outcome::Outcome;
use crate::params::SqlParams;
use crate::pool::{Database, PoolConnection};
use crate::results::{QueryResult, ResultSet};

/// An open transaction, exclusively owning its connection.
pub struct Transaction {
    conn: Option<PoolConnection>,
}

impl Transaction {
    pub(crate) async fn begin(mut conn: PoolConnection) -> Result<Self, SqlComposeError> {
        conn.execute_batch("BEGIN").await?;
        tracing::debug!("transaction started");
        Ok(Self { conn: Some(conn) })
    }

    fn conn_mut(&mut self) -> Result<&mut PoolConnection, SqlComposeError> {
        self.conn.as_mut().ok_or_else(|| {
            SqlComposeError::ExecutionError("transaction already completed".into())
        })
    }

    /// Commit and release the connection back to the pool.
    ///
    /// # Errors
    /// Returns an error if the COMMIT itself fails; the transaction is gone
    /// either way.
    pub async fn commit(mut self) -> Result<(), SqlComposeError> {
        let mut conn = self.conn.take().ok_or_else(|| {
            SqlComposeError::ExecutionError("transaction already completed".into())
        })?;
        conn.execute_batch("COMMIT").await?;
        tracing::debug!("transaction committed");
        Ok(())
    }

    /// Roll back and release the connection back to the pool.
    ///
    /// # Errors
    /// Returns an error if the ROLLBACK itself fails.
    pub async fn rollback(mut self) -> Result<(), SqlComposeError> {
        let mut conn = self.conn.take().ok_or_else(|| {
            SqlComposeError::ExecutionError("transaction already completed".into())
        })?;
        conn.execute_batch("ROLLBACK").await?;
        tracing::debug!("transaction rolled back");
        Ok(())
    }
}

#[async_trait]
impl SqlExecutor for Transaction {
    async fn execute_batch(&mut self, sql: &str) -> Result<(), SqlComposeError> {
        self.conn_mut()?.execute_batch(sql).await
    }

    async fn execute_select(
        &mut self,
        sql: &str,
        params: &SqlParams,
    ) -> Result<ResultSet, SqlComposeError> {
        self.conn_mut()?.execute_select(sql, params).await
    }

    async fn execute_dml(
        &mut self,
        sql: &str,
        params: &SqlParams,
    ) -> Result<QueryResult, SqlComposeError> {
        self.conn_mut()?.execute_dml(sql, params).await
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        if let Some(mut conn) = self.conn.take()
            && let Ok(handle) = tokio::runtime::Handle::try_current()
        {
            tracing::warn!("transaction dropped while active, rolling back");
            handle.spawn(async move {
                let _ = conn.execute_batch("ROLLBACK").await;
            });
        }
    }
}

impl std::fmt::Debug for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transaction")
            .field("active", &self.conn.is_some())
            .finish()
    }
}

impl Database {
    /// Open a transaction on a fresh pooled connection.
    ///
    /// # Errors
    /// Returns an error if no connection is available or BEGIN fails.
    pub async fn begin(&self) -> Result<Transaction, SqlComposeError> {
        let conn = self.get_connection().await?;
        Transaction::begin(conn).await
    }

    /// Run `work` as a single transaction and resolve it to one outcome.
    ///
    /// The closure receives the transaction-scoped executor; every operation
    /// it issues shares the transaction's connection.
    ///
    /// - `Ok(Success)` commits and returns the success.
    /// - `Ok(Failure)` — an expected business failure — rolls back and
    ///   returns that failure as the coordinator's own outcome.
    /// - `Err` — a driver or constraint rejection — rolls back (best
    ///   effort) and propagates unchanged; it is never folded into the
    ///   business channel.
    ///
    /// The connection is released on every path, including a panic inside
    /// `work` (the dropped handle rolls back asynchronously).
    ///
    /// # Errors
    /// Propagates fatal errors from `work`, and COMMIT/ROLLBACK failures.
    ///
    /// ```rust,no_run
    /// use sql_compose::prelude::*;
    ///
    /// # async fn demo(db: &Database) -> Result<(), SqlComposeError> {
    /// let outcome: Outcome<i64, String> = db
    ///     .transaction(|tx| {
    ///         Box::pin(async move {
    ///             let inserted = tx
    ///                 .execute_dml(
    ///                     "INSERT INTO events (name) VALUES (?1)",
    ///                     &sql_compose::params!["launch"],
    ///                 )
    ///                 .await?;
    ///             match inserted.insert_id {
    ///                 Some(id) => Ok(Outcome::Success(id)),
    ///                 None => Ok(Outcome::Failure("event-not-created".to_string())),
    ///             }
    ///         })
    ///     })
    ///     .await?;
    /// # let _ = outcome;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn transaction<S, E, F>(&self, work: F) -> Result<Outcome<S, E>, SqlComposeError>
    where
        F: for<'t> FnOnce(&'t mut Transaction) -> BoxFuture<'t, Result<Outcome<S, E>, SqlComposeError>>,
    {
        let mut tx = self.begin().await?;
        match work(&mut tx).await {
            Ok(Outcome::Success(value)) => {
                tx.commit().await?;
                Ok(Outcome::Success(value))
            }
            Ok(Outcome::Failure(failure)) => {
                tx.rollback().await?;
                Ok(Outcome::Failure(failure))
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!(error = %rollback_err, "rollback failed after fatal error");
                }
                Err(err)
            }
        }
    }
}
