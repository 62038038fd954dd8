use deadpool_sqlite::{Object, rusqlite};

use crate::error::SqlComposeError;
use crate::results::{QueryResult, ResultSet};
use crate::types::DbValue;

use super::params::convert_values;
use super::query::build_result_set;

/// Execute a batch of SQL statements in auto-commit mode (also used for
/// BEGIN/COMMIT/ROLLBACK themselves).
///
/// # Errors
/// Returns an error if execution fails.
pub(crate) async fn execute_batch(conn: &Object, sql: &str) -> Result<(), SqlComposeError> {
    let sql = sql.to_owned();
    conn.interact(move |conn| conn.execute_batch(&sql).map_err(SqlComposeError::from))
        .await?
}

/// Execute a SELECT and collect the rows.
///
/// # Errors
/// Returns an error if preparation, binding, or execution fails.
pub(crate) async fn execute_select(
    conn: &Object,
    sql: &str,
    values: Vec<DbValue>,
) -> Result<ResultSet, SqlComposeError> {
    let sql = sql.to_owned();
    conn.interact(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        build_result_set(&mut stmt, &values)
    })
    .await?
}

/// Execute a DML statement and report affected rows plus the insert rowid.
///
/// # Errors
/// Returns an error if execution fails; constraint rejections are
/// classified into `SqlComposeError::ConstraintViolation`.
pub(crate) async fn execute_dml(
    conn: &Object,
    sql: &str,
    values: Vec<DbValue>,
) -> Result<QueryResult, SqlComposeError> {
    let sql = sql.to_owned();
    conn.interact(move |conn| {
        let converted = convert_values(&values);
        let rows_affected = conn.execute(&sql, rusqlite::params_from_iter(converted))?;
        Ok(QueryResult {
            rows_affected: rows_affected as u64,
            insert_id: Some(conn.last_insert_rowid()),
        })
    })
    .await?
}
