use deadpool_postgres::Object;

use crate::error::SqlComposeError;
use crate::results::{QueryResult, ResultSet};
use crate::types::DbValue;

use super::params::as_refs;
use super::query::build_result_set_from_rows;

/// Execute a batch of SQL statements (also used for
/// BEGIN/COMMIT/ROLLBACK themselves).
///
/// # Errors
/// Returns an error if execution fails.
pub(crate) async fn execute_batch(client: &Object, sql: &str) -> Result<(), SqlComposeError> {
    client.batch_execute(sql).await?;
    Ok(())
}

/// Execute a SELECT and collect the rows.
///
/// # Errors
/// Returns an error if execution or row extraction fails.
pub(crate) async fn execute_select(
    client: &Object,
    sql: &str,
    values: &[DbValue],
) -> Result<ResultSet, SqlComposeError> {
    let refs = as_refs(values);
    let rows = client.query(sql, &refs).await?;
    build_result_set_from_rows(&rows)
}

/// Execute a DML statement and report affected rows.
///
/// Postgres has no session insert id, so `insert_id` is `None`; use
/// `RETURNING` when the new key is needed.
///
/// # Errors
/// Returns an error if execution fails; constraint rejections are
/// classified into `SqlComposeError::ConstraintViolation`.
pub(crate) async fn execute_dml(
    client: &Object,
    sql: &str,
    values: &[DbValue],
) -> Result<QueryResult, SqlComposeError> {
    let refs = as_refs(values);
    let rows_affected = client.execute(sql, &refs).await?;
    Ok(QueryResult {
        rows_affected,
        insert_id: None,
    })
}
