use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

use crate::domain::types::TypeConstraintError;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A row the operation depends on does not exist.
    #[error("entity not found")]
    NotFound,
    /// Storage rejected the write because of a constraint.
    #[error("constraint violation ({code}): {message}")]
    ConstraintViolation { code: &'static str, message: String },
    /// Stored data did not satisfy the domain type constraints.
    #[error("validation error: {0}")]
    ValidationError(String),
    /// No connection could be obtained from the pool.
    #[error("connection error: {0}")]
    Connection(String),
    #[error("unexpected database error: {0}")]
    Unexpected(String),
}

/// Convenient alias for repository results.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<DieselError> for RepositoryError {
    fn from(value: DieselError) -> Self {
        match value {
            DieselError::NotFound => Self::NotFound,
            DieselError::DatabaseError(kind, info) => {
                let code = match kind {
                    DatabaseErrorKind::UniqueViolation => "UNIQUE",
                    DatabaseErrorKind::ForeignKeyViolation => "FOREIGN_KEY",
                    DatabaseErrorKind::NotNullViolation => "NOT_NULL",
                    DatabaseErrorKind::CheckViolation => "CHECK",
                    _ => return Self::Unexpected(info.message().to_string()),
                };
                Self::ConstraintViolation {
                    code,
                    message: info.message().to_string(),
                }
            }
            other => Self::Unexpected(other.to_string()),
        }
    }
}

impl From<diesel::r2d2::PoolError> for RepositoryError {
    fn from(value: diesel::r2d2::PoolError) -> Self {
        Self::Connection(value.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(value: TypeConstraintError) -> Self {
        Self::ValidationError(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_not_found() {
        assert!(matches!(
            RepositoryError::from(DieselError::NotFound),
            RepositoryError::NotFound
        ));
    }

    #[test]
    fn rollback_maps_to_unexpected() {
        assert!(matches!(
            RepositoryError::from(DieselError::RollbackTransaction),
            RepositoryError::Unexpected(_)
        ));
    }
}
