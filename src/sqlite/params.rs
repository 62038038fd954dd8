use deadpool_sqlite::rusqlite;

use crate::types::DbValue;

/// Convert one `DbValue` to a rusqlite `Value`.
///
/// Arrays become JSON array text; statements consume them with
/// `IN (SELECT value FROM json_each(?N))`.
pub(crate) fn to_sqlite_value(value: &DbValue) -> rusqlite::types::Value {
    use rusqlite::types::Value;

    match value {
        DbValue::Int(i) => Value::Integer(*i),
        DbValue::Float(f) => Value::Real(*f),
        DbValue::Text(s) => Value::Text(s.clone()),
        DbValue::Bool(b) => Value::Integer(i64::from(*b)),
        DbValue::Timestamp(dt) => Value::Text(dt.format("%F %T%.f").to_string()),
        DbValue::Null => Value::Null,
        DbValue::Json(jval) => Value::Text(jval.to_string()),
        DbValue::Blob(bytes) => Value::Blob(bytes.clone()),
        DbValue::IntArray(xs) => Value::Text(serde_json::Value::from(xs.clone()).to_string()),
        DbValue::TextArray(xs) => Value::Text(serde_json::Value::from(xs.clone()).to_string()),
    }
}

pub(crate) fn convert_values(values: &[DbValue]) -> Vec<rusqlite::types::Value> {
    values.iter().map(to_sqlite_value).collect()
}
