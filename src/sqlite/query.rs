use std::sync::Arc;

use deadpool_sqlite::rusqlite;
use deadpool_sqlite::rusqlite::types::ValueRef;

use crate::error::SqlComposeError;
use crate::results::ResultSet;
use crate::types::DbValue;

use super::params::convert_values;

/// Run a prepared statement and collect all rows into a `ResultSet`.
pub(crate) fn build_result_set(
    stmt: &mut rusqlite::Statement<'_>,
    values: &[DbValue],
) -> Result<ResultSet, SqlComposeError> {
    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(|name| (*name).to_string())
        .collect();
    let column_count = column_names.len();

    let converted = convert_values(values);
    let mut rows = stmt.query(rusqlite::params_from_iter(converted))?;

    let mut result_set = ResultSet::default();
    result_set.set_column_names(Arc::new(column_names));

    while let Some(row) = rows.next()? {
        let mut row_values = Vec::with_capacity(column_count);
        for idx in 0..column_count {
            row_values.push(extract_value(row.get_ref(idx)?));
        }
        result_set.add_row_values(row_values);
    }

    Ok(result_set)
}

/// Map a raw `SQLite` cell to a `DbValue`.
///
/// `SQLite` has no timestamp/bool/json storage classes; those come back as
/// text or integers and coerce through the `DbValue` accessors.
fn extract_value(value_ref: ValueRef<'_>) -> DbValue {
    match value_ref {
        ValueRef::Null => DbValue::Null,
        ValueRef::Integer(i) => DbValue::Int(i),
        ValueRef::Real(f) => DbValue::Float(f),
        ValueRef::Text(bytes) => DbValue::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => DbValue::Blob(bytes.to_vec()),
    }
}
