//! Two-variant business outcome type.
//!
//! Expected, named failure conditions (not-found, duplicate handle, blocked
//! relationship) travel as [`Outcome::Failure`] data, never as errors raised
//! through `?`. The fatal channel — driver rejections, pool exhaustion,
//! constraint violations — stays on `Result<_, SqlComposeError>`, so an
//! operation that can fail both ways returns
//! `Result<Outcome<S, E>, SqlComposeError>`: the outer layer is
//! infrastructure, the inner layer is business.

use serde::{Deserialize, Serialize};

/// Success-or-failure outcome of a business operation.
///
/// Serializes as `{"status": "success", "value": …}` or
/// `{"status": "error", "value": …}` for direct use in response bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "lowercase")]
#[must_use]
pub enum Outcome<S, E> {
    Success(S),
    #[serde(rename = "error")]
    Failure(E),
}

impl<S, E> Outcome<S, E> {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    /// The success value, discarding a failure.
    pub fn success_value(self) -> Option<S> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    /// The failure value, discarding a success.
    pub fn failure_value(self) -> Option<E> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(failure) => Some(failure),
        }
    }

    /// Map the success value, leaving a failure untouched.
    pub fn map<T>(self, f: impl FnOnce(S) -> T) -> Outcome<T, E> {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Failure(failure) => Outcome::Failure(failure),
        }
    }

    /// Map the failure value, leaving a success untouched.
    pub fn map_failure<F>(self, f: impl FnOnce(E) -> F) -> Outcome<S, F> {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(failure) => Outcome::Failure(f(failure)),
        }
    }

    /// Chain another outcome-producing step off a success.
    pub fn and_then<T>(self, f: impl FnOnce(S) -> Outcome<T, E>) -> Outcome<T, E> {
        match self {
            Outcome::Success(value) => f(value),
            Outcome::Failure(failure) => Outcome::Failure(failure),
        }
    }

    /// Convert into a plain `Result` at the boundary where the caller wants
    /// to treat the failure as an error after all.
    ///
    /// # Errors
    /// Returns the failure value of a `Failure` outcome.
    pub fn into_result(self) -> Result<S, E> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(failure) => Err(failure),
        }
    }
}

impl<S, E> From<Result<S, E>> for Outcome<S, E> {
    fn from(result: Result<S, E>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(failure) => Outcome::Failure(failure),
        }
    }
}

/// Unwrap a success value or early-return the failure from an async block
/// returning `Result<Outcome<S, E>, SqlComposeError>`.
///
/// This is the short-circuit discipline for multi-check transaction bodies:
/// once a guarded check fails, later checks never run their queries.
///
/// ```rust,no_run
/// use sql_compose::prelude::*;
/// use sql_compose::try_outcome;
///
/// # async fn demo(db: &Database) -> Result<(), SqlComposeError> {
/// let result: Outcome<(), String> = db
///     .transaction(|tx| {
///         Box::pin(async move {
///             try_outcome!(
///                 tx.exists("SELECT 1 FROM bans WHERE user_id = ?1")
///                     .params(sql_compose::params![4i64])
///                     .with_failure("user-is-banned".to_string())
///                     .check()
///                     .await?
///             );
///             Ok(Outcome::Success(()))
///         })
///     })
///     .await?;
/// # let _ = result;
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! try_outcome {
    ($outcome:expr) => {
        match $outcome {
            $crate::outcome::Outcome::Success(value) => value,
            $crate::outcome::Outcome::Failure(failure) => {
                return Ok($crate::outcome::Outcome::Failure(failure.into()));
            }
        }
    };
}
