use deadpool_sqlite::{Config as SqliteConfig, Runtime};

use crate::error::SqlComposeError;
use crate::pool::{Database, Pool};
use crate::types::DatabaseType;

impl Database {
    /// Create a `SQLite`-backed database with a connection pool.
    ///
    /// The path may be a file path or a `file:` URI (e.g.
    /// `file::memory:?cache=shared`). The database is opened in WAL mode.
    ///
    /// # Errors
    /// Returns `SqlComposeError::ConfigError` if the pool cannot be created,
    /// or an execution error if the initial pragma fails.
    pub async fn new_sqlite(db_path: impl Into<String>) -> Result<Self, SqlComposeError> {
        let db_path = db_path.into();
        let cfg = SqliteConfig::new(db_path.clone());

        let pool = cfg.create_pool(Runtime::Tokio1).map_err(|e| {
            SqlComposeError::ConfigError(format!("failed to create SQLite pool: {e}"))
        })?;

        {
            let conn = pool.get().await?;
            conn.interact(|conn| {
                conn.execute_batch("PRAGMA journal_mode = WAL;")
                    .map_err(SqlComposeError::from)
            })
            .await??;
        }

        tracing::debug!(path = %db_path, "sqlite pool ready");
        Ok(Database {
            pool: Pool::Sqlite(pool),
            db_type: DatabaseType::Sqlite,
        })
    }
}
