//! Composable, failure-annotated SQL execution units.
//!
//! This crate is the thin layer between raw database drivers and business
//! logic: operations are built as typed units of work that resolve to an
//! [`Outcome`](outcome::Outcome) — expected failures (not-found, duplicate
//! handle, blocked relationship) are data, while driver rejections and
//! constraint violations stay on the error channel — and run either
//! standalone or inside a transaction through the same
//! [`SqlExecutor`](executor::SqlExecutor) interface.
//!
//! ```rust,no_run
//! use sql_compose::prelude::*;
//!
//! # async fn demo() -> Result<(), SqlComposeError> {
//! let db = Database::new_sqlite("app.db").await?;
//! let mut conn = db.get_connection().await?;
//!
//! conn.execute_batch(
//!     "CREATE TABLE IF NOT EXISTS users (
//!         id INTEGER PRIMARY KEY,
//!         handle TEXT NOT NULL CHECK (length(handle) > 0)
//!     );",
//! )
//! .await?;
//!
//! let inserted = conn
//!     .execute_dml(
//!         "INSERT INTO users (handle) VALUES (:handle)",
//!         &sql_compose::named_params! { "handle" => "alice" },
//!     )
//!     .await?;
//! assert_eq!(inserted.rows_affected, 1);
//!
//! let outcome = conn
//!     .exists("SELECT 1 FROM users WHERE handle = ?1")
//!     .params(sql_compose::params!["alice"])
//!     .inverted()
//!     .with_failure("user-not-found")
//!     .check()
//!     .await?;
//! assert!(outcome.is_success());
//! # Ok(())
//! # }
//! ```

#[cfg(not(any(feature = "postgres", feature = "sqlite")))]
compile_error!("sql-compose requires at least one backend feature: `sqlite` or `postgres`");

pub mod binding;
pub mod check;
pub mod error;
pub mod executor;
pub mod outcome;
pub mod params;
pub mod pool;
pub mod prelude;
pub mod results;
pub mod transaction;
pub mod types;

#[cfg(feature = "postgres")]
mod postgres;
#[cfg(feature = "sqlite")]
mod sqlite;

pub use binding::{PlaceholderStyle, bind_parameters};
pub use check::{ExistenceCheck, GuardedCheck};
pub use error::{ConstraintKind, SqlComposeError};
pub use executor::SqlExecutor;
pub use outcome::Outcome;
pub use params::SqlParams;
pub use pool::{Database, PoolConnection};
pub use results::{DbRow, QueryResult, ResultSet};
pub use transaction::Transaction;
pub use types::{DatabaseType, DbValue, ToDbValue};
