//! Error handling utilities for repositories

use digest_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
///
/// Unique violations become `ConstraintViolation`; pool exhaustion and
/// connection failures become `StorageUnavailable`.
pub fn map_db_error(e: SqlxError) -> DomainError {
    match e {
        SqlxError::PoolTimedOut | SqlxError::PoolClosed | SqlxError::Io(_) => {
            DomainError::StorageUnavailable(e.to_string())
        }
        SqlxError::Database(ref db_err) if db_err.is_unique_violation() => {
            DomainError::ConstraintViolation(db_err.message().to_string())
        }
        _ => DomainError::DatabaseError(e.to_string()),
    }
}
