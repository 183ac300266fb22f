//! Error type shared by repositories and services.

use crate::utils::db_error::unique_violation_constraint;

/// Errors surfaced by the content access layer.
///
/// Lookups that find nothing are not errors: they come back as `Ok(None)`.
/// Any failure reported by the store is carried unchanged in
/// [`AppError::Database`]; nothing is retried or translated.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl AppError {
    /// Returns true if the store rejected a write because of a unique constraint.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            AppError::Database(e) => unique_violation_constraint(e).is_some(),
        }
    }

    /// Name of the violated unique constraint, when the store reported one.
    pub fn constraint(&self) -> Option<&str> {
        match self {
            AppError::Database(e) => unique_violation_constraint(e).filter(|c| !c.is_empty()),
        }
    }
}
