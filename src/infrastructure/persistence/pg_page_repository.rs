//! PostgreSQL implementation of page repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewPage, Page, PageChanges};
use crate::domain::repositories::PageRepository;
use crate::error::AppError;

const PAGE_COLUMNS: &str = "id, url, title, contents, creating_user, is_shared, created_date";

/// PostgreSQL repository for content pages.
pub struct PgPageRepository {
    pool: Arc<PgPool>,
}

impl PgPageRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PageRepository for PgPageRepository {
    async fn create(&self, new_page: NewPage) -> Result<Page, AppError> {
        let mut tx = self.pool.begin().await?;

        let page = sqlx::query_as::<_, Page>(&format!(
            r#"
            INSERT INTO pages (url, title, contents, creating_user, is_shared)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {PAGE_COLUMNS}
            "#
        ))
        .bind(&new_page.url)
        .bind(&new_page.title)
        .bind(&new_page.contents)
        .bind(&new_page.creating_user)
        .bind(new_page.is_shared)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(page)
    }

    async fn find_by_url(&self, url: &str, allow_shared: bool) -> Result<Option<Page>, AppError> {
        let mut conn = self.pool.acquire().await?;

        let page = sqlx::query_as::<_, Page>(&format!(
            r#"
            SELECT {PAGE_COLUMNS}
            FROM pages
            WHERE url = $1
              AND ($2 OR is_shared IS NULL OR is_shared = FALSE)
            ORDER BY id
            LIMIT 1
            "#
        ))
        .bind(url)
        .bind(allow_shared)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(page)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Page>, AppError> {
        let mut conn = self.pool.acquire().await?;

        let page = sqlx::query_as::<_, Page>(&format!(
            "SELECT {PAGE_COLUMNS} FROM pages WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(page)
    }

    async fn list(&self) -> Result<Vec<Page>, AppError> {
        let mut conn = self.pool.acquire().await?;

        let pages = sqlx::query_as::<_, Page>(&format!(
            "SELECT {PAGE_COLUMNS} FROM pages ORDER BY created_date DESC, id DESC"
        ))
        .fetch_all(&mut *conn)
        .await?;

        Ok(pages)
    }

    async fn update(&self, id: i64, changes: PageChanges) -> Result<Option<Page>, AppError> {
        let mut tx = self.pool.begin().await?;

        // Dropping the transaction on the not-found path rolls back and releases the row lock.
        let existing = sqlx::query_scalar::<_, i64>("SELECT id FROM pages WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        if existing.is_none() {
            return Ok(None);
        }

        let page = sqlx::query_as::<_, Page>(&format!(
            r#"
            UPDATE pages SET
                title     = $2,
                url       = $3,
                contents  = $4,
                is_shared = $5
            WHERE id = $1
            RETURNING {PAGE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.url)
        .bind(&changes.contents)
        .bind(changes.is_shared)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(page))
    }
}
