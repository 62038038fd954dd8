//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types
//! to make it easier to get started with the library.

pub use crate::binding::PlaceholderStyle;
pub use crate::check::{ExistenceCheck, GuardedCheck};
pub use crate::error::{ConstraintKind, SqlComposeError};
pub use crate::executor::SqlExecutor;
pub use crate::outcome::Outcome;
pub use crate::params::SqlParams;
pub use crate::pool::{Database, PoolConnection};
pub use crate::results::{DbRow, QueryResult, ResultSet};
pub use crate::transaction::Transaction;
pub use crate::types::{DatabaseType, DbValue, ToDbValue};
