//! Error types for the records store.
//!
//! Every fallible operation returns a [`DbResult`]. [`DbError`] carries one of a
//! fixed set of codes ([`ErrorCode`]) plus a human-readable message; the code is
//! what callers branch on, the message is what they display.
//!
//! Native driver errors are translated exactly once, in the `From<sqlx::Error>`
//! impl below. No other layer looks at driver error codes.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Programmatic classification of a [`DbError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    AlreadyExists,
    ValidationError,
    ParsingError,
    OperationFailed,
    DataAccessError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::ParsingError => "PARSING_ERROR",
            Self::OperationFailed => "OPERATION_FAILED",
            Self::DataAccessError => "DATA_ACCESS_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DbError {
    /// Lookup, update or remove target is absent.
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Primary-key or uniqueness violation.
    #[error("Already exists: {message}")]
    AlreadyExists { message: String },

    /// Entity self-check failed before any SQL was issued.
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// A row could not be converted to an entity, or the reverse.
    #[error("Parsing error: {message}")]
    Parsing { message: String },

    /// A write affected nothing unexpectedly, or an API was misused.
    #[error("Operation failed: {message}")]
    OperationFailed { message: String },

    #[error("Data access error: {message}")]
    DataAccess {
        message: String,
        /// Extended SQLite result code, e.g. "1299" for NOT NULL.
        native_code: Option<String>,
    },
}

impl DbError {
    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create an already-exists error.
    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::AlreadyExists {
            message: message.into(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a parsing error.
    pub fn parsing(message: impl Into<String>) -> Self {
        Self::Parsing {
            message: message.into(),
        }
    }

    /// Create an operation-failed error.
    pub fn operation_failed(message: impl Into<String>) -> Self {
        Self::OperationFailed {
            message: message.into(),
        }
    }

    /// Create a data access error with an optional native code.
    pub fn data_access(message: impl Into<String>, native_code: Option<String>) -> Self {
        Self::DataAccess {
            message: message.into(),
            native_code,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::AlreadyExists { .. } => ErrorCode::AlreadyExists,
            Self::Validation { .. } => ErrorCode::ValidationError,
            Self::Parsing { .. } => ErrorCode::ParsingError,
            Self::OperationFailed { .. } => ErrorCode::OperationFailed,
            Self::DataAccess { .. } => ErrorCode::DataAccessError,
        }
    }

    /// The bare message, without the code prefix used by `Display`.
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound { message }
            | Self::AlreadyExists { message }
            | Self::Validation { message }
            | Self::Parsing { message }
            | Self::OperationFailed { message }
            | Self::DataAccess { message, .. } => message,
        }
    }

    /// Native driver code, only present on data access errors.
    pub fn native_code(&self) -> Option<&str> {
        match self {
            Self::DataAccess { native_code, .. } => native_code.as_deref(),
            _ => None,
        }
    }
}

/// Convert sqlx errors to DbError.
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        use sqlx::error::ErrorKind;

        match err {
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().map(|c| c.to_string());
                match db_err.kind() {
                    ErrorKind::UniqueViolation => DbError::already_exists(db_err.message()),
                    ErrorKind::ForeignKeyViolation => DbError::not_found(format!(
                        "referenced record does not exist ({})",
                        db_err.message()
                    )),
                    _ => DbError::data_access(db_err.message(), code),
                }
            }
            sqlx::Error::Configuration(msg) => {
                DbError::data_access(format!("Invalid configuration: {}", msg), None)
            }
            sqlx::Error::RowNotFound => DbError::not_found("No rows returned"),
            sqlx::Error::Io(io_err) => DbError::data_access(format!("I/O error: {}", io_err), None),
            sqlx::Error::Protocol(msg) => {
                DbError::data_access(format!("Protocol error: {}", msg), None)
            }
            sqlx::Error::ColumnNotFound(col) => {
                DbError::data_access(format!("Column not found: {}", col), None)
            }
            sqlx::Error::ColumnIndexOutOfBounds { index, len } => DbError::data_access(
                format!("Column index {} out of bounds (len: {})", index, len),
                None,
            ),
            sqlx::Error::ColumnDecode { index, source } => DbError::data_access(
                format!("Failed to decode column {}: {}", index, source),
                None,
            ),
            sqlx::Error::Decode(source) => {
                DbError::data_access(format!("Decode error: {}", source), None)
            }
            sqlx::Error::WorkerCrashed => DbError::data_access("Database worker crashed", None),
            _ => DbError::data_access(format!("Unknown database error: {}", err), None),
        }
    }
}

/// Result type alias for data access operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DbError::not_found("course 'CS101'");
        assert_eq!(err.to_string(), "Not found: course 'CS101'");
        assert_eq!(err.message(), "course 'CS101'");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(DbError::not_found("x").code(), ErrorCode::NotFound);
        assert_eq!(DbError::already_exists("x").code(), ErrorCode::AlreadyExists);
        assert_eq!(DbError::validation("x").code(), ErrorCode::ValidationError);
        assert_eq!(DbError::parsing("x").code(), ErrorCode::ParsingError);
        assert_eq!(
            DbError::operation_failed("x").code(),
            ErrorCode::OperationFailed
        );
        assert_eq!(
            DbError::data_access("x", None).code(),
            ErrorCode::DataAccessError
        );
    }

    #[test]
    fn test_code_names() {
        assert_eq!(ErrorCode::AlreadyExists.to_string(), "ALREADY_EXISTS");
        assert_eq!(
            serde_json::to_string(&ErrorCode::DataAccessError).unwrap(),
            "\"DATA_ACCESS_ERROR\""
        );
    }

    #[test]
    fn test_native_code_only_on_data_access() {
        let err = DbError::data_access("constraint failed", Some("275".to_string()));
        assert_eq!(err.native_code(), Some("275"));
        assert_eq!(DbError::not_found("x").native_code(), None);
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: DbError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[test]
    fn test_worker_crash_maps_to_data_access() {
        let err: DbError = sqlx::Error::WorkerCrashed.into();
        assert_eq!(err.code(), ErrorCode::DataAccessError);
        assert!(err.message().contains("worker"));
    }
}
