use std::sync::Arc;

use serde::Serialize;

use crate::types::DbValue;

/// A single row of a query result.
///
/// Column names are shared across all rows of a result set.
#[derive(Debug, Clone, PartialEq)]
pub struct DbRow {
    column_names: Arc<Vec<String>>,
    values: Vec<DbValue>,
}

impl DbRow {
    #[must_use]
    pub fn new(column_names: Arc<Vec<String>>, values: Vec<DbValue>) -> Self {
        Self {
            column_names,
            values,
        }
    }

    /// Get a value by column name, or `None` if the column is absent.
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&DbValue> {
        let idx = self
            .column_names
            .iter()
            .position(|name| name == column_name)?;
        self.values.get(idx)
    }

    /// Get a value by column index.
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&DbValue> {
        self.values.get(index)
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    #[must_use]
    pub fn values(&self) -> &[DbValue] {
        &self.values
    }
}

/// Rows returned by a SELECT.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    rows: Vec<DbRow>,
    column_names: Option<Arc<Vec<String>>>,
}

impl ResultSet {
    /// Create a result set with preallocated row capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> ResultSet {
        ResultSet {
            rows: Vec::with_capacity(capacity),
            column_names: None,
        }
    }

    /// Set the column names shared by all rows.
    pub fn set_column_names(&mut self, column_names: Arc<Vec<String>>) {
        self.column_names = Some(column_names);
    }

    #[must_use]
    pub fn column_names(&self) -> Option<&Arc<Vec<String>>> {
        self.column_names.as_ref()
    }

    /// Append a row from raw values; a no-op until column names are set.
    pub fn add_row_values(&mut self, values: Vec<DbValue>) {
        if let Some(column_names) = &self.column_names {
            self.rows.push(DbRow::new(column_names.clone(), values));
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[DbRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DbRow> {
        self.rows.iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a DbRow;
    type IntoIter = std::slice::Iter<'a, DbRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Metadata reported by a mutating statement (INSERT, UPDATE, DELETE).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QueryResult {
    /// Rows changed by the statement.
    pub rows_affected: u64,
    /// Rowid of the inserted row. `SQLite` reports it for every insert;
    /// Postgres has no session insert id, so it is `None` there (use
    /// `RETURNING` instead).
    pub insert_id: Option<i64>,
}
