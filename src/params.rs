//! Statement parameters: positional lists and order-preserving named maps.
//!
//! Normalization is pure — constructors take values through
//! [`ToDbValue`](crate::types::ToDbValue) and produce a fresh [`SqlParams`];
//! nothing mutates the caller's data, and normalizing twice yields the same
//! result.

use crate::types::{DbValue, ToDbValue};

/// Parameters for one statement.
///
/// `Named` keeps insertion order; that order defines the placeholder
/// ordinals the binding scanner assigns (see
/// [`bind_parameters`](crate::binding::bind_parameters)).
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParams {
    Positional(Vec<DbValue>),
    Named(Vec<(String, DbValue)>),
}

impl Default for SqlParams {
    fn default() -> Self {
        SqlParams::Positional(Vec::new())
    }
}

impl SqlParams {
    /// No parameters at all.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            SqlParams::Positional(values) => values.len(),
            SqlParams::Named(entries) => entries.len(),
        }
    }

    /// Build a positional list, normalizing each value through `ToDbValue`.
    pub fn positional<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToDbValue,
    {
        SqlParams::Positional(values.into_iter().map(|v| v.to_db_value()).collect())
    }

    /// Build a named map, normalizing each value through `ToDbValue` and
    /// preserving entry order.
    pub fn named<I, K, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: ToDbValue,
    {
        SqlParams::Named(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.to_db_value()))
                .collect(),
        )
    }
}

impl From<Vec<DbValue>> for SqlParams {
    fn from(values: Vec<DbValue>) -> Self {
        SqlParams::Positional(values)
    }
}

impl From<&[DbValue]> for SqlParams {
    fn from(values: &[DbValue]) -> Self {
        SqlParams::Positional(values.to_vec())
    }
}

/// Build positional [`SqlParams`] from expressions implementing
/// [`ToDbValue`](crate::types::ToDbValue).
///
/// ```rust
/// let p = sql_compose::params![1i64, "alice", Option::<i64>::None];
/// assert_eq!(p.len(), 3);
/// ```
#[macro_export]
macro_rules! params {
    () => {
        $crate::params::SqlParams::default()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::params::SqlParams::Positional(vec![
            $($crate::types::ToDbValue::to_db_value(&$value)),+
        ])
    };
}

/// Build named [`SqlParams`]; entry order defines placeholder ordinals.
///
/// ```rust
/// let p = sql_compose::named_params! {
///     "id" => 7i64,
///     "handle" => "alice",
/// };
/// assert_eq!(p.len(), 2);
/// ```
#[macro_export]
macro_rules! named_params {
    () => {
        $crate::params::SqlParams::Named(Vec::new())
    };
    ($($name:literal => $value:expr),+ $(,)?) => {
        $crate::params::SqlParams::Named(vec![
            $((
                ::std::string::String::from($name),
                $crate::types::ToDbValue::to_db_value(&$value),
            )),+
        ])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_preserves_element_order() {
        let p = SqlParams::positional([DbValue::Int(1), DbValue::Int(2), DbValue::Int(3)]);
        assert_eq!(
            p,
            SqlParams::Positional(vec![DbValue::Int(1), DbValue::Int(2), DbValue::Int(3)])
        );
    }

    #[test]
    fn named_preserves_key_order() {
        let p = SqlParams::named([("b", 2i64), ("a", 1i64), ("c", 3i64)]);
        let SqlParams::Named(entries) = p else {
            panic!("expected named params");
        };
        let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[test]
    fn normalization_is_idempotent_and_does_not_mutate() {
        let source = vec![("id".to_string(), 9i64)];
        let first = SqlParams::named(source.iter().map(|(k, v)| (k.clone(), *v)));
        let second = SqlParams::named(source.iter().map(|(k, v)| (k.clone(), *v)));
        assert_eq!(first, second);
        assert_eq!(source, vec![("id".to_string(), 9i64)]);
    }

    #[test]
    fn option_normalizes_to_null() {
        let p = params![Some(5i64), Option::<i64>::None];
        assert_eq!(
            p,
            SqlParams::Positional(vec![DbValue::Int(5), DbValue::Null])
        );
    }

    #[test]
    fn empty_forms_mean_no_parameters() {
        assert!(params![].is_empty());
        assert!(SqlParams::none().is_empty());
        assert!(named_params! {}.is_empty());
    }
}
