use thiserror::Error;

#[cfg(feature = "sqlite")]
use deadpool_sqlite::rusqlite;

/// Classification of a database-enforced constraint rejection.
///
/// Constraint violations are fatal (they indicate a programming or data
/// error, not an expected business path), but callers still need to tell a
/// CHECK failure apart from, say, a unique-index collision. The kind is
/// derived from the driver's structured error code, never from message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// CHECK constraint failed
    Check,
    /// UNIQUE or PRIMARY KEY constraint failed
    Unique,
    /// NOT NULL constraint failed
    NotNull,
    /// FOREIGN KEY constraint failed
    ForeignKey,
    /// Some other constraint the backend reported without a finer code
    Other,
}

impl std::fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ConstraintKind::Check => "check",
            ConstraintKind::Unique => "unique",
            ConstraintKind::NotNull => "not-null",
            ConstraintKind::ForeignKey => "foreign-key",
            ConstraintKind::Other => "constraint",
        })
    }
}

#[derive(Debug, Error)]
pub enum SqlComposeError {
    #[cfg(feature = "postgres")]
    #[error(transparent)]
    PostgresError(tokio_postgres::Error),

    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    SqliteError(rusqlite::Error),

    #[cfg(feature = "postgres")]
    #[error("Pool error: {0}")]
    PoolErrorPostgres(#[from] deadpool_postgres::PoolError),

    #[cfg(feature = "sqlite")]
    #[error("Pool error: {0}")]
    PoolErrorSqlite(#[from] deadpool_sqlite::PoolError),

    #[error("Constraint violation ({kind}): {message}")]
    ConstraintViolation {
        kind: ConstraintKind,
        /// Name of the violated constraint, when the backend reports one.
        constraint: Option<String>,
        message: String,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Parameter error: {0}")]
    ParameterError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),

    #[error("Other database error: {0}")]
    Other(String),
}

impl SqlComposeError {
    /// The constraint classification, if this error is a constraint violation.
    #[must_use]
    pub fn constraint_kind(&self) -> Option<ConstraintKind> {
        match self {
            SqlComposeError::ConstraintViolation { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// True if the database rejected the statement over any constraint.
    #[must_use]
    pub fn is_constraint_violation(&self) -> bool {
        self.constraint_kind().is_some()
    }

    /// True specifically for CHECK constraint failures.
    #[must_use]
    pub fn is_check_violation(&self) -> bool {
        self.constraint_kind() == Some(ConstraintKind::Check)
    }

    /// Name of the violated constraint, when the backend reports one.
    #[must_use]
    pub fn violated_constraint(&self) -> Option<&str> {
        match self {
            SqlComposeError::ConstraintViolation { constraint, .. } => constraint.as_deref(),
            _ => None,
        }
    }
}

// SQLite reports constraints through the extended result code; the primary
// code alone only says "some constraint". Classify on the extended code and
// fall back to `Other` for constraint codes without a finer mapping.
#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for SqlComposeError {
    fn from(err: rusqlite::Error) -> Self {
        use rusqlite::ffi;

        if let rusqlite::Error::SqliteFailure(code, ref message) = err {
            let kind = match code.extended_code {
                ffi::SQLITE_CONSTRAINT_CHECK => Some(ConstraintKind::Check),
                ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                    Some(ConstraintKind::Unique)
                }
                ffi::SQLITE_CONSTRAINT_NOTNULL => Some(ConstraintKind::NotNull),
                ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Some(ConstraintKind::ForeignKey),
                _ if code.code == rusqlite::ErrorCode::ConstraintViolation => {
                    Some(ConstraintKind::Other)
                }
                _ => None,
            };
            if let Some(kind) = kind {
                return SqlComposeError::ConstraintViolation {
                    kind,
                    constraint: None,
                    message: message.clone().unwrap_or_else(|| code.to_string()),
                };
            }
        }
        SqlComposeError::SqliteError(err)
    }
}

#[cfg(feature = "sqlite")]
impl From<deadpool_sqlite::InteractError> for SqlComposeError {
    fn from(err: deadpool_sqlite::InteractError) -> Self {
        SqlComposeError::ExecutionError(format!("SQLite interact error: {err}"))
    }
}

// Postgres reports constraints through SQLSTATE class 23.
#[cfg(feature = "postgres")]
impl From<tokio_postgres::Error> for SqlComposeError {
    fn from(err: tokio_postgres::Error) -> Self {
        use tokio_postgres::error::SqlState;

        if let Some(db_err) = err.as_db_error() {
            let code = db_err.code();
            let kind = if *code == SqlState::CHECK_VIOLATION {
                Some(ConstraintKind::Check)
            } else if *code == SqlState::UNIQUE_VIOLATION {
                Some(ConstraintKind::Unique)
            } else if *code == SqlState::NOT_NULL_VIOLATION {
                Some(ConstraintKind::NotNull)
            } else if *code == SqlState::FOREIGN_KEY_VIOLATION {
                Some(ConstraintKind::ForeignKey)
            } else if code.code().starts_with("23") {
                Some(ConstraintKind::Other)
            } else {
                None
            };
            if let Some(kind) = kind {
                return SqlComposeError::ConstraintViolation {
                    kind,
                    constraint: db_err.constraint().map(ToOwned::to_owned),
                    message: db_err.message().to_owned(),
                };
            }
        }
        SqlComposeError::PostgresError(err)
    }
}
