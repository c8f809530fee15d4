//! Error types for the access layer.

use thiserror::Error;

use crate::statement::TemplateKind;

/// Comprehensive error type for all access-layer operations.
#[derive(Error, Debug)]
pub enum SondeError {
    /// A table or column name failed identifier validation
    #[error("Invalid identifier '{name}': {reason}")]
    InvalidIdentifier { name: String, reason: String },
    /// A statement template name did not match any known template
    #[error("Unsupported statement template '{kind}'")]
    UnsupportedTemplate { kind: String },
    /// The number of identifiers or values did not match the template
    #[error(
        "Arity mismatch for {kind} template: expected {expected} {slot}, got {actual}"
    )]
    ArityMismatch {
        kind: TemplateKind,
        slot: &'static str,
        expected: usize,
        actual: usize,
    },
    /// The engine reported a uniqueness or integrity violation
    #[error("Constraint violation: {context}")]
    ConstraintViolation {
        context: String,
        #[source]
        source: rusqlite::Error,
    },
    /// The engine reported that the table does not exist
    #[error("Table '{table}' not found")]
    TableNotFound { table: String },
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}

impl SondeError {
    /// Creates an identifier validation error.
    pub fn invalid_identifier(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new database error with additional context.
    pub fn database_error(message: &str, source: rusqlite::Error) -> Self {
        Self::Database {
            message: message.to_string(),
            source,
        }
    }
}

/// Maps a driver failure onto the error taxonomy.
///
/// Constraint violations and missing tables are the two driver failures the
/// caller can act on, so they get their own variants; everything else passes
/// through unchanged as a generic database error with the statement context
/// preserved.
pub(crate) fn classify_driver_error(context: &str, source: rusqlite::Error) -> SondeError {
    match source {
        rusqlite::Error::SqliteFailure(code, message)
            if code.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            SondeError::ConstraintViolation {
                context: context.to_string(),
                source: rusqlite::Error::SqliteFailure(code, message),
            }
        }
        rusqlite::Error::SqliteFailure(code, Some(message)) => {
            if let Some(table) = message.strip_prefix("no such table: ") {
                SondeError::TableNotFound {
                    table: table.to_string(),
                }
            } else {
                SondeError::Database {
                    message: context.to_string(),
                    source: rusqlite::Error::SqliteFailure(code, Some(message)),
                }
            }
        }
        other => SondeError::Database {
            message: context.to_string(),
            source: other,
        },
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;

    /// Map database errors through the driver-error classifier.
    fn classify(self, context: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| SondeError::database_error(message, e))
    }

    fn classify(self, context: &str) -> Result<T> {
        self.map_err(|e| classify_driver_error(context, e))
    }
}

/// Result type alias for access-layer operations
pub type Result<T> = std::result::Result<T, SondeError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn sqlite_failure(code: rusqlite::ErrorCode, message: &str) -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error {
                code,
                extended_code: 0,
            },
            Some(message.to_string()),
        )
    }

    #[test]
    fn test_classify_constraint_violation() {
        let err = sqlite_failure(
            rusqlite::ErrorCode::ConstraintViolation,
            "UNIQUE constraint failed: students.id",
        );
        match classify_driver_error("insert", err) {
            SondeError::ConstraintViolation { context, .. } => assert_eq!(context, "insert"),
            other => panic!("Expected ConstraintViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_missing_table() {
        let err = sqlite_failure(rusqlite::ErrorCode::Unknown, "no such table: ghosts");
        match classify_driver_error("count rows", err) {
            SondeError::TableNotFound { table } => assert_eq!(table, "ghosts"),
            other => panic!("Expected TableNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_passthrough() {
        let err = sqlite_failure(rusqlite::ErrorCode::Unknown, "near \"FROM\": syntax error");
        match classify_driver_error("query", err) {
            SondeError::Database { message, .. } => assert_eq!(message, "query"),
            other => panic!("Expected Database, got {other:?}"),
        }
    }
}
