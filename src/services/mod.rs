use crate::repository::RepositoryError;

pub mod auth;
pub mod categories;
pub mod errors;
pub mod posts;
pub mod topics;
pub mod votes;

pub use errors::{ServiceError, ServiceResult};

/// Translate a failed repository write into a service error.
///
/// Constraint violations are the caller's fault and keep their code for
/// diagnostics; anything else is logged and hidden behind `Internal`.
pub(crate) fn write_error(action: &str, err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::ConstraintViolation { code, message } => {
            log::warn!("Failed to {action}: constraint {code}: {message}");
            ServiceError::Conflict {
                message: format!("Failed to {action}: the request conflicts with stored data"),
                code,
            }
        }
        RepositoryError::NotFound => ServiceError::NotFound,
        err => {
            log::error!("Failed to {action}: {err}");
            ServiceError::Internal
        }
    }
}

/// Log a failed repository read and hide it behind `Internal`.
pub(crate) fn read_error(action: &str, err: RepositoryError) -> ServiceError {
    log::error!("Failed to {action}: {err}");
    ServiceError::Internal
}
