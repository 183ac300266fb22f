//! Repository trait for content page data access.

use crate::domain::entities::{NewPage, Page, PageChanges};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for content pages.
///
/// Callers pass already-normalized keys; the repository compares them verbatim.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgPageRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageRepository: Send + Sync {
    /// Inserts a page and commits.
    ///
    /// Returns the stored row, including the generated `id` and `created_date`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on store errors, including constraint
    /// violations raised by the schema.
    async fn create(&self, new_page: NewPage) -> Result<Page, AppError>;

    /// Finds the first page whose url equals `url`.
    ///
    /// When `allow_shared` is false only pages with `is_shared` NULL or false
    /// are considered. When several rows match, the lowest id wins.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on store errors.
    async fn find_by_url(&self, url: &str, allow_shared: bool) -> Result<Option<Page>, AppError>;

    /// Finds a page by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on store errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Page>, AppError>;

    /// Lists every page, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on store errors.
    async fn list(&self) -> Result<Vec<Page>, AppError>;

    /// Overwrites title, url, contents and is_shared of an existing page.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Page))` with the committed row
    /// - `Ok(None)` if no page has this id; nothing is written
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on store errors.
    async fn update(&self, id: i64, changes: PageChanges) -> Result<Option<Page>, AppError>;
}
