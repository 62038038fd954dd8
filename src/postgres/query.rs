use std::sync::Arc;

use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;

use crate::error::SqlComposeError;
use crate::results::ResultSet;
use crate::types::DbValue;

/// Build a result set from raw Postgres rows.
pub(crate) fn build_result_set_from_rows(
    rows: &[tokio_postgres::Row],
) -> Result<ResultSet, SqlComposeError> {
    let mut result_set = ResultSet::with_capacity(rows.len());
    if let Some(row) = rows.first() {
        let column_names: Vec<String> =
            row.columns().iter().map(|c| c.name().to_string()).collect();
        result_set.set_column_names(Arc::new(column_names));
    }

    for row in rows {
        let column_count = row.columns().len();
        let mut row_values = Vec::with_capacity(column_count);
        for idx in 0..column_count {
            row_values.push(extract_value(row, idx)?);
        }
        result_set.add_row_values(row_values);
    }

    Ok(result_set)
}

/// Extract one cell as a `DbValue`, dispatching on the column's type name.
fn extract_value(row: &tokio_postgres::Row, idx: usize) -> Result<DbValue, SqlComposeError> {
    let type_name = row.columns()[idx].type_().name();

    if type_name == "int2" {
        let val: Option<i16> = row.try_get(idx)?;
        Ok(val.map_or(DbValue::Null, |v| DbValue::Int(i64::from(v))))
    } else if type_name == "int4" {
        let val: Option<i32> = row.try_get(idx)?;
        Ok(val.map_or(DbValue::Null, |v| DbValue::Int(i64::from(v))))
    } else if type_name == "int8" {
        let val: Option<i64> = row.try_get(idx)?;
        Ok(val.map_or(DbValue::Null, DbValue::Int))
    } else if type_name == "float4" || type_name == "float8" {
        let val: Option<f64> = row.try_get(idx)?;
        Ok(val.map_or(DbValue::Null, DbValue::Float))
    } else if type_name == "bool" {
        let val: Option<bool> = row.try_get(idx)?;
        Ok(val.map_or(DbValue::Null, DbValue::Bool))
    } else if type_name == "timestamp" || type_name == "timestamptz" {
        let val: Option<NaiveDateTime> = row.try_get(idx)?;
        Ok(val.map_or(DbValue::Null, DbValue::Timestamp))
    } else if type_name == "json" || type_name == "jsonb" {
        let val: Option<JsonValue> = row.try_get(idx)?;
        Ok(val.map_or(DbValue::Null, DbValue::Json))
    } else if type_name == "bytea" {
        let val: Option<Vec<u8>> = row.try_get(idx)?;
        Ok(val.map_or(DbValue::Null, DbValue::Blob))
    } else if type_name == "_int8" {
        let val: Option<Vec<i64>> = row.try_get(idx)?;
        Ok(val.map_or(DbValue::Null, DbValue::IntArray))
    } else if type_name == "_text" || type_name == "_varchar" {
        let val: Option<Vec<String>> = row.try_get(idx)?;
        Ok(val.map_or(DbValue::Null, DbValue::TextArray))
    } else {
        // Everything else (text, varchar, name, unknown types) as text.
        let val: Option<String> = row.try_get(idx)?;
        Ok(val.map_or(DbValue::Null, DbValue::Text))
    }
}
