//! Lazy, chainable existence checks.
//!
//! An [`ExistenceCheck`] pairs a "does this condition hold" query with a
//! polarity and, optionally, a business failure value. Nothing touches the
//! database until the terminal [`get`](ExistenceCheck::get) /
//! [`check`](GuardedCheck::check) call, and the terminal call consumes the
//! pipeline — a composed check runs its query exactly once.
//!
//! ```rust,no_run
//! use sql_compose::prelude::*;
//!
//! # async fn demo(conn: &mut PoolConnection) -> Result<(), SqlComposeError> {
//! let outcome = conn
//!     .exists("SELECT 1 FROM blocks WHERE blocker = ?1 AND blocked = ?2")
//!     .params(sql_compose::params![1i64, 2i64])
//!     .with_failure("user-is-blocked")
//!     .check()
//!     .await?;
//! # let _ = outcome;
//! # Ok(())
//! # }
//! ```

use std::borrow::Cow;

use crate::error::SqlComposeError;
use crate::executor::SqlExecutor;
use crate::outcome::Outcome;
use crate::params::SqlParams;
use crate::pool::PoolConnection;
use crate::transaction::Transaction;

/// Final polarity of a check: whether the flagged condition holds after
/// inversions are applied.
pub(crate) fn final_polarity(rows_found: bool, negated: bool) -> bool {
    rows_found != negated
}

/// A pending boolean check built from a row-returning query.
///
/// The check resolves to `true` when the query returns at least one row,
/// flipped by each [`inverted`](Self::inverted) in the pipeline.
#[must_use]
pub struct ExistenceCheck<'a> {
    executor: &'a mut (dyn SqlExecutor + 'a),
    sql: Cow<'a, str>,
    params: SqlParams,
    negated: bool,
}

impl<'a> ExistenceCheck<'a> {
    pub fn new(executor: &'a mut (dyn SqlExecutor + 'a), sql: impl Into<Cow<'a, str>>) -> Self {
        Self {
            executor,
            sql: sql.into(),
            params: SqlParams::default(),
            negated: false,
        }
    }

    /// Provide parameters for the underlying query.
    pub fn params(mut self, params: impl Into<SqlParams>) -> Self {
        self.params = params.into();
        self
    }

    /// Flip the check's polarity. Applying this an even number of times is
    /// the identity.
    pub fn inverted(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    /// Run the query (once) and resolve the final boolean.
    ///
    /// # Errors
    /// Returns an error if the query fails; the boolean itself is never an
    /// error.
    pub async fn get(self) -> Result<bool, SqlComposeError> {
        let result_set = self
            .executor
            .execute_select(self.sql.as_ref(), &self.params)
            .await?;
        Ok(final_polarity(!result_set.is_empty(), self.negated))
    }

    /// Finalize the pipeline into a business outcome: `failure` is produced
    /// exactly when the final boolean is `true`.
    pub fn with_failure<E>(self, failure: E) -> GuardedCheck<'a, E> {
        GuardedCheck {
            check: self,
            failure,
        }
    }
}

impl std::fmt::Debug for ExistenceCheck<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExistenceCheck")
            .field("sql", &self.sql)
            .field("negated", &self.negated)
            .finish_non_exhaustive()
    }
}

/// An existence check annotated with the failure it signals.
#[must_use]
pub struct GuardedCheck<'a, E> {
    check: ExistenceCheck<'a>,
    failure: E,
}

impl<E> GuardedCheck<'_, E> {
    /// Flip the underlying check's polarity.
    pub fn inverted(mut self) -> Self {
        self.check = self.check.inverted();
        self
    }

    /// Run the query (once) and resolve to an outcome.
    ///
    /// # Errors
    /// Returns an error only for infrastructure failures; the business
    /// failure arrives as `Outcome::Failure`.
    pub async fn check(self) -> Result<Outcome<(), E>, SqlComposeError> {
        if self.check.get().await? {
            Ok(Outcome::Failure(self.failure))
        } else {
            Ok(Outcome::Success(()))
        }
    }
}

impl PoolConnection {
    /// Start an existence check against this connection.
    pub fn exists<'a>(&'a mut self, sql: &'a str) -> ExistenceCheck<'a> {
        ExistenceCheck::new(self, sql)
    }
}

impl Transaction {
    /// Start an existence check inside this transaction.
    pub fn exists<'a>(&'a mut self, sql: &'a str) -> ExistenceCheck<'a> {
        ExistenceCheck::new(self, sql)
    }
}

#[cfg(test)]
mod tests {
    use super::final_polarity;

    #[test]
    fn polarity_truth_table() {
        assert!(final_polarity(true, false));
        assert!(!final_polarity(false, false));
        assert!(!final_polarity(true, true));
        assert!(final_polarity(false, true));
    }

    #[test]
    fn even_inversions_are_identity() {
        for rows_found in [false, true] {
            for inversions in 0..6 {
                let mut negated = false;
                for _ in 0..inversions {
                    negated = !negated;
                }
                let expected = if inversions % 2 == 0 {
                    rows_found
                } else {
                    !rows_found
                };
                assert_eq!(final_polarity(rows_found, negated), expected);
            }
        }
    }
}
