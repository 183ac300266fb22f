//! Page and redirect access service.

use std::sync::Arc;

use crate::domain::entities::{NewPage, NewRedirect, Page, PageChanges, Redirect, RedirectChanges};
use crate::domain::repositories::{PageRepository, RedirectRepository};
use crate::domain::seed::{SeedData, SeedReport};
use crate::error::AppError;
use crate::utils::normalize::normalize_key;

/// Service for reading and writing CMS pages and redirects.
///
/// Normalizes lookup keys before they reach the store: page urls and redirect
/// short urls are trimmed and lower-cased, names, titles and contents are
/// trimmed. Nothing else is validated.
///
/// "Not found" is never an error. Lookups return `Ok(None)`, and updates of a
/// missing record return `Ok(None)` without writing anything.
pub struct ContentService<P: PageRepository, R: RedirectRepository> {
    page_repository: Arc<P>,
    redirect_repository: Arc<R>,
}

impl<P: PageRepository, R: RedirectRepository> ContentService<P, R> {
    /// Creates a new content service over the given store handles.
    pub fn new(page_repository: Arc<P>, redirect_repository: Arc<R>) -> Self {
        Self {
            page_repository,
            redirect_repository,
        }
    }

    /// Looks up the redirect registered under `url` after normalizing it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on store errors.
    pub async fn get_redirect(&self, url: &str) -> Result<Option<Redirect>, AppError> {
        let short_url = normalize_key(url);
        tracing::debug!(short_url = %short_url, "Looking up redirect");

        self.redirect_repository.find_by_short_url(&short_url).await
    }

    /// Returns every redirect, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on store errors.
    pub async fn all_redirects(&self) -> Result<Vec<Redirect>, AppError> {
        self.redirect_repository.list().await
    }

    /// Creates a redirect and commits it immediately.
    ///
    /// `user_email` is recorded as the creating user as given; the caller is
    /// expected to have authenticated it. Duplicate short urls are not checked
    /// here.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on store errors, including unique
    /// violations enforced by the schema.
    pub async fn create_redirect(
        &self,
        name: &str,
        short_url: &str,
        url: &str,
        user_email: &str,
    ) -> Result<Redirect, AppError> {
        let new_redirect = NewRedirect::normalized(name, short_url, url, user_email);
        let redirect = self.redirect_repository.create(new_redirect).await?;

        tracing::info!(
            id = redirect.id,
            short_url = %redirect.short_url,
            creating_user = %redirect.creating_user,
            "Redirect created"
        );

        Ok(redirect)
    }

    /// Looks up a redirect by id.
    ///
    /// `None` and `Some(0)` return `Ok(None)` without a store call.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on store errors.
    pub async fn get_redirect_by_id(
        &self,
        redirect_id: Option<i64>,
    ) -> Result<Option<Redirect>, AppError> {
        let Some(id) = redirect_id.filter(|id| *id != 0) else {
            return Ok(None);
        };

        self.redirect_repository.find_by_id(id).await
    }

    /// Overwrites name, short url and destination of an existing redirect.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Redirect))` with the committed row
    /// - `Ok(None)` if no redirect has this id; the store is left unchanged
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on store errors.
    pub async fn update_redirect(
        &self,
        redirect_id: i64,
        name: &str,
        short_url: &str,
        url: &str,
    ) -> Result<Option<Redirect>, AppError> {
        let changes = RedirectChanges::normalized(name, short_url, url);
        let updated = self.redirect_repository.update(redirect_id, changes).await?;

        match &updated {
            Some(redirect) => tracing::info!(
                id = redirect.id,
                short_url = %redirect.short_url,
                "Redirect updated"
            ),
            None => tracing::debug!(id = redirect_id, "Redirect not found, nothing updated"),
        }

        Ok(updated)
    }

    /// Looks up a page by its normalized url.
    ///
    /// Unless `allow_shared` is set, pages flagged `is_shared = true` are
    /// excluded; pages with the flag unset or false always match.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on store errors.
    pub async fn get_page(&self, url: &str, allow_shared: bool) -> Result<Option<Page>, AppError> {
        let url = normalize_key(url);
        tracing::debug!(url = %url, allow_shared, "Looking up page");

        self.page_repository.find_by_url(&url, allow_shared).await
    }

    /// Returns every page, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on store errors.
    pub async fn all_pages(&self) -> Result<Vec<Page>, AppError> {
        self.page_repository.list().await
    }

    /// Looks up a page by id.
    ///
    /// `None` and `Some(0)` return `Ok(None)` without a store call.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on store errors.
    pub async fn get_page_by_id(&self, page_id: Option<i64>) -> Result<Option<Page>, AppError> {
        let Some(id) = page_id.filter(|id| *id != 0) else {
            return Ok(None);
        };

        self.page_repository.find_by_id(id).await
    }

    /// Overwrites title, url, contents and sharing flag of an existing page.
    ///
    /// A missing or empty `url` makes this a no-op. Otherwise the url is
    /// normalized and title/contents are trimmed when present.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Page))` with the committed row
    /// - `Ok(None)` if `url` is missing or empty, or no page has this id
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on store errors.
    pub async fn update_page(
        &self,
        page_id: i64,
        title: Option<&str>,
        url: Option<&str>,
        contents: Option<&str>,
        is_shared: Option<bool>,
    ) -> Result<Option<Page>, AppError> {
        let Some(url) = url.filter(|u| !u.is_empty()) else {
            tracing::debug!(id = page_id, "Page update without url ignored");
            return Ok(None);
        };

        let changes = PageChanges::normalized(title, url, contents, is_shared);
        let updated = self.page_repository.update(page_id, changes).await?;

        match &updated {
            Some(page) => tracing::info!(id = page.id, url = %page.url, "Page updated"),
            None => tracing::debug!(id = page_id, "Page not found, nothing updated"),
        }

        Ok(updated)
    }

    /// Creates a page and commits it immediately.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on store errors.
    pub async fn create_page(
        &self,
        title: Option<&str>,
        url: &str,
        contents: Option<&str>,
        user_email: &str,
        is_shared: Option<bool>,
    ) -> Result<Page, AppError> {
        let new_page = NewPage::normalized(title, url, contents, user_email, is_shared);
        let page = self.page_repository.create(new_page).await?;

        tracing::info!(
            id = page.id,
            url = %page.url,
            creating_user = %page.creating_user,
            "Page created"
        );

        Ok(page)
    }

    /// Imports a seed set, skipping entries whose key already exists.
    ///
    /// Existing pages are detected regardless of their sharing flag. Entries
    /// are created one at a time; a store error stops the import and earlier
    /// entries stay committed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on store errors.
    pub async fn import_seed(
        &self,
        seed: &SeedData,
        user_email: &str,
    ) -> Result<SeedReport, AppError> {
        let mut report = SeedReport::default();

        for entry in &seed.pages {
            if self.get_page(&entry.url, true).await?.is_some() {
                report.pages_skipped += 1;
                continue;
            }

            self.create_page(
                entry.title.as_deref(),
                &entry.url,
                entry.contents.as_deref(),
                user_email,
                entry.is_shared,
            )
            .await?;
            report.pages_created += 1;
        }

        for entry in &seed.redirects {
            if self.get_redirect(&entry.short_url).await?.is_some() {
                report.redirects_skipped += 1;
                continue;
            }

            self.create_redirect(&entry.name, &entry.short_url, &entry.url, user_email)
                .await?;
            report.redirects_created += 1;
        }

        tracing::info!(
            pages_created = report.pages_created,
            pages_skipped = report.pages_skipped,
            redirects_created = report.redirects_created,
            redirects_skipped = report.redirects_skipped,
            "Seed import finished"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockPageRepository, MockRedirectRepository};
    use chrono::Utc;

    fn create_test_redirect(id: i64, short_url: &str, url: &str) -> Redirect {
        Redirect::new(
            id,
            "Test".to_string(),
            short_url.to_string(),
            url.to_string(),
            "a@b.com".to_string(),
            Utc::now(),
        )
    }

    fn create_test_page(id: i64, url: &str, is_shared: Option<bool>) -> Page {
        Page::new(
            id,
            url.to_string(),
            Some("Title".to_string()),
            Some("Contents".to_string()),
            "a@b.com".to_string(),
            is_shared,
            Utc::now(),
        )
    }

    fn service(
        pages: MockPageRepository,
        redirects: MockRedirectRepository,
    ) -> ContentService<MockPageRepository, MockRedirectRepository> {
        ContentService::new(Arc::new(pages), Arc::new(redirects))
    }

    #[tokio::test]
    async fn test_get_redirect_normalizes_key() {
        let mut mock_redirect_repo = MockRedirectRepository::new();

        let found = create_test_redirect(1, "courses", "https://x");
        mock_redirect_repo
            .expect_find_by_short_url()
            .withf(|short_url| short_url == "courses")
            .times(1)
            .returning(move |_| Ok(Some(found.clone())));

        let service = service(MockPageRepository::new(), mock_redirect_repo);

        let result = service.get_redirect("  CoUrSeS \t").await.unwrap();

        assert_eq!(result.unwrap().id, 1);
    }

    #[tokio::test]
    async fn test_get_redirect_not_found_is_none() {
        let mut mock_redirect_repo = MockRedirectRepository::new();
        mock_redirect_repo
            .expect_find_by_short_url()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(MockPageRepository::new(), mock_redirect_repo);

        assert!(service.get_redirect("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_redirect_empty_key_queries_empty() {
        let mut mock_redirect_repo = MockRedirectRepository::new();
        mock_redirect_repo
            .expect_find_by_short_url()
            .withf(|short_url| short_url.is_empty())
            .times(1)
            .returning(|_| Ok(None));

        let service = service(MockPageRepository::new(), mock_redirect_repo);

        assert!(service.get_redirect("").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_redirect_propagates_store_error() {
        let mut mock_redirect_repo = MockRedirectRepository::new();
        mock_redirect_repo
            .expect_find_by_short_url()
            .times(1)
            .returning(|_| Err(AppError::Database(sqlx::Error::PoolTimedOut)));

        let service = service(MockPageRepository::new(), mock_redirect_repo);

        let result = service.get_redirect("courses").await;

        assert!(matches!(
            result,
            Err(AppError::Database(sqlx::Error::PoolTimedOut))
        ));
    }

    #[tokio::test]
    async fn test_create_redirect_normalizes_fields() {
        let mut mock_redirect_repo = MockRedirectRepository::new();
        mock_redirect_repo
            .expect_create()
            .withf(|new_redirect| {
                new_redirect.name == "Courses"
                    && new_redirect.short_url == "courses"
                    && new_redirect.url == "https://x"
                    && new_redirect.creating_user == "a@b.com"
            })
            .times(1)
            .returning(|new_redirect| {
                Ok(Redirect::new(
                    10,
                    new_redirect.name,
                    new_redirect.short_url,
                    new_redirect.url,
                    new_redirect.creating_user,
                    Utc::now(),
                ))
            });

        let service = service(MockPageRepository::new(), mock_redirect_repo);

        let redirect = service
            .create_redirect("Courses", " Courses ", "https://x", "a@b.com")
            .await
            .unwrap();

        assert_eq!(redirect.id, 10);
        assert_eq!(redirect.short_url, "courses");
        assert_eq!(redirect.url, "https://x");
    }

    #[tokio::test]
    async fn test_get_redirect_by_id_falsy_skips_store() {
        let mut mock_redirect_repo = MockRedirectRepository::new();
        mock_redirect_repo.expect_find_by_id().times(0);

        let service = service(MockPageRepository::new(), mock_redirect_repo);

        assert!(service.get_redirect_by_id(None).await.unwrap().is_none());
        assert!(service.get_redirect_by_id(Some(0)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_redirect_by_id_found() {
        let mut mock_redirect_repo = MockRedirectRepository::new();

        let found = create_test_redirect(5, "bytes", "https://pythonbytes.fm/");
        mock_redirect_repo
            .expect_find_by_id()
            .withf(|id| *id == 5)
            .times(1)
            .returning(move |_| Ok(Some(found.clone())));

        let service = service(MockPageRepository::new(), mock_redirect_repo);

        let redirect = service.get_redirect_by_id(Some(5)).await.unwrap();

        assert_eq!(redirect.unwrap().short_url, "bytes");
    }

    #[tokio::test]
    async fn test_update_redirect_not_found_is_silent() {
        let mut mock_redirect_repo = MockRedirectRepository::new();
        mock_redirect_repo
            .expect_update()
            .withf(|id, _| *id == 404)
            .times(1)
            .returning(|_, _| Ok(None));

        let service = service(MockPageRepository::new(), mock_redirect_repo);

        let result = service
            .update_redirect(404, "Name", "short", "https://x")
            .await;

        assert!(result.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_redirect_normalizes_fields() {
        let mut mock_redirect_repo = MockRedirectRepository::new();
        mock_redirect_repo
            .expect_update()
            .withf(|id, changes| {
                *id == 3
                    && changes.name == "Talk Python"
                    && changes.short_url == "talk"
                    && changes.url == "https://TalkPython.fm"
            })
            .times(1)
            .returning(|id, changes| {
                Ok(Some(Redirect::new(
                    id,
                    changes.name,
                    changes.short_url,
                    changes.url,
                    "original@b.com".to_string(),
                    Utc::now(),
                )))
            });

        let service = service(MockPageRepository::new(), mock_redirect_repo);

        let updated = service
            .update_redirect(3, " Talk Python ", " TALK ", " https://TalkPython.fm ")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.short_url, "talk");
        assert_eq!(updated.creating_user, "original@b.com");
    }

    #[tokio::test]
    async fn test_all_redirects_passes_through_order() {
        let mut mock_redirect_repo = MockRedirectRepository::new();
        mock_redirect_repo.expect_list().times(1).returning(|| {
            Ok(vec![
                create_test_redirect(2, "newer", "https://b"),
                create_test_redirect(1, "older", "https://a"),
            ])
        });

        let service = service(MockPageRepository::new(), mock_redirect_repo);

        let redirects = service.all_redirects().await.unwrap();

        assert_eq!(
            redirects.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![2, 1]
        );
    }

    #[tokio::test]
    async fn test_get_page_mixed_case_and_normalized_query_same_key() {
        let mut mock_page_repo = MockPageRepository::new();
        mock_page_repo
            .expect_find_by_url()
            .withf(|url, allow_shared| url == "company/history" && !*allow_shared)
            .times(2)
            .returning(|_, _| Ok(None));

        let service = service(mock_page_repo, MockRedirectRepository::new());

        service.get_page("  Company/HISTORY ", false).await.unwrap();
        service.get_page("company/history", false).await.unwrap();
    }

    #[tokio::test]
    async fn test_get_page_forwards_allow_shared() {
        let mut mock_page_repo = MockPageRepository::new();

        let shared = create_test_page(9, "team", Some(true));
        mock_page_repo
            .expect_find_by_url()
            .withf(|url, allow_shared| url == "team" && *allow_shared)
            .times(1)
            .returning(move |_, _| Ok(Some(shared.clone())));

        let service = service(mock_page_repo, MockRedirectRepository::new());

        let page = service.get_page("TEAM", true).await.unwrap().unwrap();

        assert!(page.is_shared());
    }

    #[tokio::test]
    async fn test_get_page_by_id_falsy_skips_store() {
        let mut mock_page_repo = MockPageRepository::new();
        mock_page_repo.expect_find_by_id().times(0);

        let service = service(mock_page_repo, MockRedirectRepository::new());

        assert!(service.get_page_by_id(None).await.unwrap().is_none());
        assert!(service.get_page_by_id(Some(0)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_page_without_url_skips_store() {
        let mut mock_page_repo = MockPageRepository::new();
        mock_page_repo.expect_update().times(0);

        let service = service(mock_page_repo, MockRedirectRepository::new());

        let missing = service
            .update_page(1, Some("Title"), None, Some("Body"), None)
            .await
            .unwrap();
        let empty = service
            .update_page(1, Some("Title"), Some(""), Some("Body"), None)
            .await
            .unwrap();

        assert!(missing.is_none());
        assert!(empty.is_none());
    }

    #[tokio::test]
    async fn test_update_page_not_found_is_silent() {
        let mut mock_page_repo = MockPageRepository::new();
        mock_page_repo
            .expect_update()
            .times(1)
            .returning(|_, _| Ok(None));

        let service = service(mock_page_repo, MockRedirectRepository::new());

        let result = service
            .update_page(77, None, Some("about"), None, Some(false))
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_update_page_normalizes_fields() {
        let mut mock_page_repo = MockPageRepository::new();
        mock_page_repo
            .expect_update()
            .withf(|id, changes| {
                *id == 4
                    && changes.url == "company/history"
                    && changes.title.as_deref() == Some("History")
                    && changes.contents.as_deref() == Some("Founded long ago.")
                    && changes.is_shared == Some(true)
            })
            .times(1)
            .returning(|id, changes| {
                Ok(Some(Page::new(
                    id,
                    changes.url,
                    changes.title,
                    changes.contents,
                    "a@b.com".to_string(),
                    changes.is_shared,
                    Utc::now(),
                )))
            });

        let service = service(mock_page_repo, MockRedirectRepository::new());

        let page = service
            .update_page(
                4,
                Some(" History "),
                Some(" Company/History "),
                Some("\n Founded long ago. \n"),
                Some(true),
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(page.url, "company/history");
    }

    #[tokio::test]
    async fn test_create_page_normalizes_fields() {
        let mut mock_page_repo = MockPageRepository::new();
        mock_page_repo
            .expect_create()
            .withf(|new_page| {
                new_page.url == "company/employees"
                    && new_page.title.as_deref() == Some("Our team")
                    && new_page.contents.is_none()
                    && new_page.creating_user == "a@b.com"
                    && new_page.is_shared.is_none()
            })
            .times(1)
            .returning(|new_page| {
                Ok(Page::new(
                    12,
                    new_page.url,
                    new_page.title,
                    new_page.contents,
                    new_page.creating_user,
                    new_page.is_shared,
                    Utc::now(),
                ))
            });

        let service = service(mock_page_repo, MockRedirectRepository::new());

        let page = service
            .create_page(Some(" Our team "), " COMPANY/Employees ", None, "a@b.com", None)
            .await
            .unwrap();

        assert_eq!(page.id, 12);
        assert_eq!(page.url, "company/employees");
    }

    #[tokio::test]
    async fn test_import_seed_skips_existing_entries() {
        let mut mock_page_repo = MockPageRepository::new();
        let mut mock_redirect_repo = MockRedirectRepository::new();

        let existing_page = create_test_page(1, "company/history", Some(true));
        mock_page_repo
            .expect_find_by_url()
            .withf(|_, allow_shared| *allow_shared)
            .times(2)
            .returning(move |url, _| {
                if url == "company/history" {
                    Ok(Some(existing_page.clone()))
                } else {
                    Ok(None)
                }
            });
        mock_page_repo
            .expect_create()
            .withf(|new_page| new_page.url == "company/employees")
            .times(1)
            .returning(|new_page| {
                Ok(Page::new(
                    2,
                    new_page.url,
                    new_page.title,
                    new_page.contents,
                    new_page.creating_user,
                    new_page.is_shared,
                    Utc::now(),
                ))
            });

        let existing_redirect = create_test_redirect(1, "bytes", "https://pythonbytes.fm/");
        mock_redirect_repo
            .expect_find_by_short_url()
            .times(2)
            .returning(move |short_url| {
                if short_url == "bytes" {
                    Ok(Some(existing_redirect.clone()))
                } else {
                    Ok(None)
                }
            });
        mock_redirect_repo
            .expect_create()
            .withf(|new_redirect| new_redirect.short_url == "courses")
            .times(1)
            .returning(|new_redirect| {
                Ok(Redirect::new(
                    2,
                    new_redirect.name,
                    new_redirect.short_url,
                    new_redirect.url,
                    new_redirect.creating_user,
                    Utc::now(),
                ))
            });

        let service = service(mock_page_repo, mock_redirect_repo);

        let report = service
            .import_seed(&SeedData::defaults(), "seed@b.com")
            .await
            .unwrap();

        assert_eq!(
            report,
            SeedReport {
                pages_created: 1,
                pages_skipped: 1,
                redirects_created: 1,
                redirects_skipped: 1,
            }
        );
    }
}
