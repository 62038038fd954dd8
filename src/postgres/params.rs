use std::error::Error;

use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};
use tokio_util::bytes;

use crate::types::DbValue;

impl ToSql for DbValue {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut bytes::BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match self {
            DbValue::Int(i) => (*i).to_sql(ty, out),
            DbValue::Float(f) => (*f).to_sql(ty, out),
            DbValue::Text(s) => s.to_sql(ty, out),
            DbValue::Bool(b) => (*b).to_sql(ty, out),
            DbValue::Timestamp(dt) => dt.to_sql(ty, out),
            DbValue::Null => Ok(IsNull::Yes),
            DbValue::Json(jval) => jval.to_sql(ty, out),
            DbValue::Blob(bytes) => bytes.to_sql(ty, out),
            DbValue::IntArray(xs) => xs.to_sql(ty, out),
            DbValue::TextArray(xs) => xs.to_sql(ty, out),
        }
    }

    fn accepts(ty: &Type) -> bool {
        // Only accept types we can properly handle
        match *ty {
            Type::INT2 | Type::INT4 | Type::INT8 => true,
            Type::FLOAT4 | Type::FLOAT8 => true,
            Type::TEXT | Type::VARCHAR | Type::CHAR | Type::NAME => true,
            Type::BOOL => true,
            Type::TIMESTAMP | Type::TIMESTAMPTZ | Type::DATE => true,
            Type::JSON | Type::JSONB => true,
            Type::BYTEA => true,
            Type::INT8_ARRAY | Type::TEXT_ARRAY | Type::VARCHAR_ARRAY => true,
            _ => false,
        }
    }

    to_sql_checked!();
}

/// Borrow a value slice as the reference array `tokio-postgres` expects.
pub(crate) fn as_refs(values: &[DbValue]) -> Vec<&(dyn ToSql + Sync)> {
    values.iter().map(|v| v as &(dyn ToSql + Sync)).collect()
}
