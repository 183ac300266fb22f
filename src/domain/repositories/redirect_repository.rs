//! Repository trait for redirect data access.

use crate::domain::entities::{NewRedirect, Redirect, RedirectChanges};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for short URL redirects.
///
/// No uniqueness is checked here. If the schema declares `short_url` unique,
/// duplicates surface as [`AppError::Database`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgRedirectRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RedirectRepository: Send + Sync {
    /// Inserts a redirect and commits.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on store errors.
    async fn create(&self, new_redirect: NewRedirect) -> Result<Redirect, AppError>;

    /// Finds the redirect registered under `short_url`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Redirect))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on store errors.
    async fn find_by_short_url(&self, short_url: &str) -> Result<Option<Redirect>, AppError>;

    /// Finds a redirect by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on store errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Redirect>, AppError>;

    /// Lists every redirect, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on store errors.
    async fn list(&self) -> Result<Vec<Redirect>, AppError>;

    /// Overwrites name, short_url and url of an existing redirect.
    ///
    /// `creating_user` and `created_date` are never touched.
    /// Returns `Ok(None)` without writing if no redirect has this id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on store errors.
    async fn update(
        &self,
        id: i64,
        changes: RedirectChanges,
    ) -> Result<Option<Redirect>, AppError>;
}
