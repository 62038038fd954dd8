use deadpool_postgres::Config as PgConfig;
use tokio_postgres::NoTls;

use crate::error::SqlComposeError;
use crate::pool::{Database, Pool};
use crate::types::DatabaseType;

impl Database {
    /// Create a Postgres-backed database with a connection pool.
    ///
    /// # Errors
    /// Returns `SqlComposeError::ConfigError` if required config fields are
    /// missing, or `SqlComposeError::ConnectionError` if pool creation
    /// fails.
    pub async fn new_postgres(pg_config: PgConfig) -> Result<Self, SqlComposeError> {
        for (field, present) in [
            ("dbname", pg_config.dbname.is_some()),
            ("host", pg_config.host.is_some()),
            ("user", pg_config.user.is_some()),
        ] {
            if !present {
                return Err(SqlComposeError::ConfigError(format!("{field} is required")));
            }
        }

        let pool = pg_config
            .create_pool(Some(deadpool_postgres::Runtime::Tokio1), NoTls)
            .map_err(|e| {
                SqlComposeError::ConnectionError(format!("failed to create Postgres pool: {e}"))
            })?;

        tracing::debug!("postgres pool ready");
        Ok(Database {
            pool: Pool::Postgres(pool),
            db_type: DatabaseType::Postgres,
        })
    }
}
