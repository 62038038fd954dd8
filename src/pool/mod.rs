//! Connection pooling: the [`Database`] handle, its backend pool, and the
//! pooled connections handed to executor code.
//!
//! A [`PoolConnection`] is exclusively owned by whichever scope acquired it;
//! a transaction keeps one for its whole lifetime (see
//! [`Transaction`](crate::transaction::Transaction)), while separate
//! top-level operations draw separate connections and run concurrently.

use crate::binding::PlaceholderStyle;
use crate::error::SqlComposeError;
use crate::types::DatabaseType;

/// Connection pool for one configured backend.
#[derive(Clone)]
pub enum Pool {
    #[cfg(feature = "sqlite")]
    Sqlite(deadpool_sqlite::Pool),
    #[cfg(feature = "postgres")]
    Postgres(deadpool_postgres::Pool),
}

// Manual Debug because the pool types do not all expose `Debug`.
impl std::fmt::Debug for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "sqlite")]
            Pool::Sqlite(_) => f.debug_tuple("Sqlite").field(&"<pool>").finish(),
            #[cfg(feature = "postgres")]
            Pool::Postgres(_) => f.debug_tuple("Postgres").field(&"<pool>").finish(),
        }
    }
}

/// A connection checked out of the pool.
pub enum PoolConnection {
    #[cfg(feature = "sqlite")]
    Sqlite(deadpool_sqlite::Object),
    #[cfg(feature = "postgres")]
    Postgres(deadpool_postgres::Object),
}

impl std::fmt::Debug for PoolConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "sqlite")]
            PoolConnection::Sqlite(_) => f.debug_tuple("Sqlite").field(&"<connection>").finish(),
            #[cfg(feature = "postgres")]
            PoolConnection::Postgres(_) => {
                f.debug_tuple("Postgres").field(&"<connection>").finish()
            }
        }
    }
}

impl PoolConnection {
    /// The positional placeholder style this connection's backend expects.
    #[must_use]
    pub(crate) fn placeholder_style(&self) -> PlaceholderStyle {
        match self {
            #[cfg(feature = "sqlite")]
            PoolConnection::Sqlite(_) => PlaceholderStyle::Sqlite,
            #[cfg(feature = "postgres")]
            PoolConnection::Postgres(_) => PlaceholderStyle::Postgres,
        }
    }
}

/// A configured backend and its connection pool.
///
/// Cheap to clone; clones share the pool.
#[derive(Clone, Debug)]
pub struct Database {
    pub(crate) pool: Pool,
    pub(crate) db_type: DatabaseType,
}

impl Database {
    #[must_use]
    pub fn db_type(&self) -> DatabaseType {
        self.db_type
    }

    /// Check a connection out of the pool.
    ///
    /// # Errors
    /// Returns a pool error if no connection can be provided.
    pub async fn get_connection(&self) -> Result<PoolConnection, SqlComposeError> {
        match &self.pool {
            #[cfg(feature = "sqlite")]
            Pool::Sqlite(pool) => Ok(PoolConnection::Sqlite(pool.get().await?)),
            #[cfg(feature = "postgres")]
            Pool::Postgres(pool) => Ok(PoolConnection::Postgres(pool.get().await?)),
        }
    }
}
