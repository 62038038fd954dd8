use chrono::NaiveDateTime;
use clap::ValueEnum;
use serde_json::Value as JsonValue;

/// Values that can be bound as statement parameters or read back from a row.
///
/// One enum shared by both backends, so composition code never branches on
/// driver types:
/// ```rust
/// use sql_compose::prelude::*;
///
/// let params = sql_compose::params![1i64, "alice", true];
/// # let _ = params;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum DbValue {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Boolean value
    Bool(bool),
    /// Timestamp value
    Timestamp(NaiveDateTime),
    /// NULL value
    Null,
    /// JSON value
    Json(JsonValue),
    /// Binary data
    Blob(Vec<u8>),
    /// Integer array (`int8[]` on Postgres, JSON array text on SQLite)
    IntArray(Vec<i64>),
    /// Text array (`text[]` on Postgres, JSON array text on SQLite)
    TextArray(Vec<String>),
}

impl DbValue {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        if let DbValue::Int(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let DbValue::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    /// Boolean accessor; SQLite stores booleans as 0/1 integers, so those
    /// coerce too.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DbValue::Bool(value) => Some(*value),
            DbValue::Int(0) => Some(false),
            DbValue::Int(1) => Some(true),
            _ => None,
        }
    }

    /// Timestamp accessor; text columns holding `YYYY-MM-DD HH:MM:SS[.SSS]`
    /// parse too, since SQLite returns timestamps as text.
    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        if let DbValue::Timestamp(value) = self {
            return Some(*value);
        }
        if let Some(s) = self.as_text() {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
                return Some(dt);
            }
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
                return Some(dt);
            }
        }
        None
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let DbValue::Float(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let DbValue::Blob(bytes) = self {
            Some(bytes)
        } else {
            None
        }
    }
}

/// Capability interface for values that know their own driver-safe
/// representation.
///
/// Domain value types (handles, color strings, identifiers) implement this
/// explicitly instead of being probed for a serialization method at runtime;
/// the parameter macros and [`SqlParams`](crate::params::SqlParams)
/// constructors dispatch through it.
///
/// ```rust
/// use sql_compose::types::{DbValue, ToDbValue};
///
/// struct Handle(String);
///
/// impl ToDbValue for Handle {
///     fn to_db_value(&self) -> DbValue {
///         DbValue::Text(self.0.to_lowercase())
///     }
/// }
/// ```
pub trait ToDbValue {
    fn to_db_value(&self) -> DbValue;
}

impl ToDbValue for DbValue {
    fn to_db_value(&self) -> DbValue {
        self.clone()
    }
}

impl<T: ToDbValue + ?Sized> ToDbValue for &T {
    fn to_db_value(&self) -> DbValue {
        (*self).to_db_value()
    }
}

/// `None` normalizes to the driver's NULL.
impl<T: ToDbValue> ToDbValue for Option<T> {
    fn to_db_value(&self) -> DbValue {
        match self {
            Some(value) => value.to_db_value(),
            None => DbValue::Null,
        }
    }
}

impl ToDbValue for i64 {
    fn to_db_value(&self) -> DbValue {
        DbValue::Int(*self)
    }
}

impl ToDbValue for i32 {
    fn to_db_value(&self) -> DbValue {
        DbValue::Int(i64::from(*self))
    }
}

impl ToDbValue for f64 {
    fn to_db_value(&self) -> DbValue {
        DbValue::Float(*self)
    }
}

impl ToDbValue for bool {
    fn to_db_value(&self) -> DbValue {
        DbValue::Bool(*self)
    }
}

impl ToDbValue for str {
    fn to_db_value(&self) -> DbValue {
        DbValue::Text(self.to_owned())
    }
}

impl ToDbValue for String {
    fn to_db_value(&self) -> DbValue {
        DbValue::Text(self.clone())
    }
}

impl ToDbValue for NaiveDateTime {
    fn to_db_value(&self) -> DbValue {
        DbValue::Timestamp(*self)
    }
}

impl ToDbValue for chrono::DateTime<chrono::Utc> {
    fn to_db_value(&self) -> DbValue {
        DbValue::Timestamp(self.naive_utc())
    }
}

impl ToDbValue for JsonValue {
    fn to_db_value(&self) -> DbValue {
        DbValue::Json(self.clone())
    }
}

impl ToDbValue for Vec<u8> {
    fn to_db_value(&self) -> DbValue {
        DbValue::Blob(self.clone())
    }
}

impl ToDbValue for [u8] {
    fn to_db_value(&self) -> DbValue {
        DbValue::Blob(self.to_vec())
    }
}

impl ToDbValue for Vec<i64> {
    fn to_db_value(&self) -> DbValue {
        DbValue::IntArray(self.clone())
    }
}

impl ToDbValue for [i64] {
    fn to_db_value(&self) -> DbValue {
        DbValue::IntArray(self.to_vec())
    }
}

impl ToDbValue for Vec<String> {
    fn to_db_value(&self) -> DbValue {
        DbValue::TextArray(self.clone())
    }
}

impl ToDbValue for [String] {
    fn to_db_value(&self) -> DbValue {
        DbValue::TextArray(self.to_vec())
    }
}

/// The database backend behind a [`Database`](crate::pool::Database).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum DatabaseType {
    /// `PostgreSQL` database
    #[cfg(feature = "postgres")]
    Postgres,
    /// `SQLite` database
    #[cfg(feature = "sqlite")]
    Sqlite,
}
