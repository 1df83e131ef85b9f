//! Error types for the planner library.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::TaskStatus;

/// Comprehensive error type for all planner operations.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Record is missing or belongs to another user. The two cases are
    /// reported identically.
    #[error("{entity} with ID {id} not found")]
    NotFound { entity: &'static str, id: u64 },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Task status change outside the allowed transition table
    #[error("Cannot change task status from {from} to {to}")]
    InvalidTransition { from: TaskStatus, to: TaskStatus },
    /// Time blocks of a finalized plan are read-only
    #[error("Daily plan {id} is finalized and can no longer be edited")]
    PlanFinalized { id: u64 },
    /// Finalizing requires at least one time block
    #[error("Daily plan {id} has no time blocks")]
    EmptyPlan { id: u64 },
    /// A reflection already exists for the plan
    #[error("Daily plan {plan_id} already has a reflection")]
    DuplicateReflection { plan_id: u64 },
    /// No caller identity was supplied
    #[error("Unauthorized: {reason}")]
    Unauthorized { reason: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    /// Unexpected failure in a collaborator
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Caller-facing category of a [`PlannerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    BadRequest,
    Unauthorized,
    Internal,
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> PlannerError {
        PlannerError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> PlannerError {
        PlannerError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl PlannerError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a not-found error for the named entity.
    pub fn not_found(entity: &'static str, id: u64) -> Self {
        Self::NotFound { entity, id }
    }

    /// Creates an internal error from anything displayable.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Maps the error onto the category surfaced to callers.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidInput { .. }
            | Self::InvalidTransition { .. }
            | Self::PlanFinalized { .. }
            | Self::EmptyPlan { .. }
            | Self::DuplicateReflection { .. } => ErrorKind::BadRequest,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::Database { .. }
            | Self::FileSystem { .. }
            | Self::XdgDirectory(_)
            | Self::Serialization { .. }
            | Self::Configuration { .. }
            | Self::Internal { .. } => ErrorKind::Internal,
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| PlannerError::database(message).with_source(e))
    }
}

/// Result type alias for planner operations
pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_categories() {
        assert_eq!(
            PlannerError::not_found("Task", 1).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            PlannerError::invalid_input("title")
                .with_reason("too long")
                .kind(),
            ErrorKind::BadRequest
        );
        assert_eq!(
            PlannerError::InvalidTransition {
                from: TaskStatus::Completed,
                to: TaskStatus::Pending,
            }
            .kind(),
            ErrorKind::BadRequest
        );
        assert_eq!(
            PlannerError::PlanFinalized { id: 3 }.kind(),
            ErrorKind::BadRequest
        );
        assert_eq!(
            PlannerError::Unauthorized {
                reason: "no user".into()
            }
            .kind(),
            ErrorKind::Unauthorized
        );
        assert_eq!(
            PlannerError::internal("mailer down").kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn test_not_found_message_hides_ownership() {
        let err = PlannerError::not_found("Daily plan", 42);
        assert_eq!(err.to_string(), "Daily plan with ID 42 not found");
    }
}
