//! The executor interface: run SQL, get rows or mutation metadata back.
//!
//! [`SqlExecutor`] is implemented by both a plain pooled connection and a
//! [`Transaction`](crate::transaction::Transaction), so a unit of work
//! written against the trait runs identically standalone and inside a
//! transaction.

use async_trait::async_trait;

use crate::binding::bind_parameters;
use crate::error::SqlComposeError;
use crate::params::SqlParams;
use crate::pool::PoolConnection;
use crate::results::{QueryResult, ResultSet};

#[cfg(feature = "postgres")]
use crate::postgres;
#[cfg(feature = "sqlite")]
use crate::sqlite;

/// Asynchronous SQL execution over one connection.
#[async_trait]
pub trait SqlExecutor: Send {
    /// Execute a batch of statements (no parameters).
    ///
    /// # Errors
    /// Returns an error if the backend rejects any statement in the batch.
    async fn execute_batch(&mut self, sql: &str) -> Result<(), SqlComposeError>;

    /// Execute a row-returning statement.
    ///
    /// # Errors
    /// Returns an error if parameter binding fails or the backend rejects
    /// the statement.
    async fn execute_select(
        &mut self,
        sql: &str,
        params: &SqlParams,
    ) -> Result<ResultSet, SqlComposeError>;

    /// Execute a mutating statement (INSERT, UPDATE, DELETE) and report
    /// affected rows plus the insert id where the backend has one.
    ///
    /// # Errors
    /// Returns an error if parameter binding fails or the backend rejects
    /// the statement; constraint rejections carry a
    /// [`ConstraintKind`](crate::error::ConstraintKind).
    async fn execute_dml(
        &mut self,
        sql: &str,
        params: &SqlParams,
    ) -> Result<QueryResult, SqlComposeError>;
}

#[async_trait]
impl SqlExecutor for PoolConnection {
    async fn execute_batch(&mut self, sql: &str) -> Result<(), SqlComposeError> {
        match self {
            #[cfg(feature = "sqlite")]
            PoolConnection::Sqlite(conn) => sqlite::executor::execute_batch(conn, sql).await,
            #[cfg(feature = "postgres")]
            PoolConnection::Postgres(client) => {
                postgres::executor::execute_batch(client, sql).await
            }
        }
    }

    async fn execute_select(
        &mut self,
        sql: &str,
        params: &SqlParams,
    ) -> Result<ResultSet, SqlComposeError> {
        let (sql, values) = bind_parameters(sql, params, self.placeholder_style())?;
        match self {
            #[cfg(feature = "sqlite")]
            PoolConnection::Sqlite(conn) => {
                sqlite::executor::execute_select(conn, sql.as_ref(), values).await
            }
            #[cfg(feature = "postgres")]
            PoolConnection::Postgres(client) => {
                postgres::executor::execute_select(client, sql.as_ref(), &values).await
            }
        }
    }

    async fn execute_dml(
        &mut self,
        sql: &str,
        params: &SqlParams,
    ) -> Result<QueryResult, SqlComposeError> {
        let (sql, values) = bind_parameters(sql, params, self.placeholder_style())?;
        match self {
            #[cfg(feature = "sqlite")]
            PoolConnection::Sqlite(conn) => {
                sqlite::executor::execute_dml(conn, sql.as_ref(), values).await
            }
            #[cfg(feature = "postgres")]
            PoolConnection::Postgres(client) => {
                postgres::executor::execute_dml(client, sql.as_ref(), &values).await
            }
        }
    }
}
