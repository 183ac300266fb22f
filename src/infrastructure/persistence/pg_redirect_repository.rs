//! PostgreSQL implementation of redirect repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewRedirect, Redirect, RedirectChanges};
use crate::domain::repositories::RedirectRepository;
use crate::error::AppError;

const REDIRECT_COLUMNS: &str = "id, name, short_url, url, creating_user, created_date";

/// PostgreSQL repository for short URL redirects.
///
/// Uses bound parameters for every value; `short_url` is compared verbatim, so
/// callers pass the normalized key.
pub struct PgRedirectRepository {
    pool: Arc<PgPool>,
}

impl PgRedirectRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RedirectRepository for PgRedirectRepository {
    async fn create(&self, new_redirect: NewRedirect) -> Result<Redirect, AppError> {
        let mut tx = self.pool.begin().await?;

        let redirect = sqlx::query_as::<_, Redirect>(&format!(
            r#"
            INSERT INTO redirects (name, short_url, url, creating_user)
            VALUES ($1, $2, $3, $4)
            RETURNING {REDIRECT_COLUMNS}
            "#
        ))
        .bind(&new_redirect.name)
        .bind(&new_redirect.short_url)
        .bind(&new_redirect.url)
        .bind(&new_redirect.creating_user)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(redirect)
    }

    async fn find_by_short_url(&self, short_url: &str) -> Result<Option<Redirect>, AppError> {
        let mut conn = self.pool.acquire().await?;

        let redirect = sqlx::query_as::<_, Redirect>(&format!(
            "SELECT {REDIRECT_COLUMNS} FROM redirects WHERE short_url = $1 ORDER BY id LIMIT 1"
        ))
        .bind(short_url)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(redirect)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Redirect>, AppError> {
        let mut conn = self.pool.acquire().await?;

        let redirect = sqlx::query_as::<_, Redirect>(&format!(
            "SELECT {REDIRECT_COLUMNS} FROM redirects WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(redirect)
    }

    async fn list(&self) -> Result<Vec<Redirect>, AppError> {
        let mut conn = self.pool.acquire().await?;

        let redirects = sqlx::query_as::<_, Redirect>(&format!(
            "SELECT {REDIRECT_COLUMNS} FROM redirects ORDER BY created_date DESC, id DESC"
        ))
        .fetch_all(&mut *conn)
        .await?;

        Ok(redirects)
    }

    async fn update(
        &self,
        id: i64,
        changes: RedirectChanges,
    ) -> Result<Option<Redirect>, AppError> {
        let mut tx = self.pool.begin().await?;

        let existing =
            sqlx::query_scalar::<_, i64>("SELECT id FROM redirects WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        if existing.is_none() {
            return Ok(None);
        }

        let redirect = sqlx::query_as::<_, Redirect>(&format!(
            r#"
            UPDATE redirects SET
                name      = $2,
                short_url = $3,
                url       = $4
            WHERE id = $1
            RETURNING {REDIRECT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.short_url)
        .bind(&changes.url)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(redirect))
    }
}
