//! Domain errors - error types for the domain layer
//!
//! "Not found" is not an error here: lookups return `Option`.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Query Errors
    // =========================================================================
    /// A single-row lookup matched more than one row
    #[error("Multiple rows matched a single-row lookup on {entity}")]
    MultipleResults { entity: &'static str },

    #[error("Invalid digest period: {0}")]
    InvalidPeriod(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    // =========================================================================
    // Aborted Operations
    // =========================================================================
    #[error("Operation cancelled")]
    Cancelled,

    #[error("Deadline exceeded after {0} ms")]
    DeadlineExceeded(u64),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::MultipleResults { .. } => "MULTIPLE_RESULTS",
            Self::InvalidPeriod(_) => "INVALID_PERIOD",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::ConstraintViolation(_) => "CONSTRAINT_VIOLATION",
            Self::Cancelled => "CANCELLED",
            Self::DeadlineExceeded(_) => "DEADLINE_EXCEEDED",
            Self::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidPeriod(_) | Self::ValidationError(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ConstraintViolation(_))
    }

    /// Check if the operation was aborted before completing
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded(_))
    }

    /// Check if the storage backend could not be reached
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }
}
