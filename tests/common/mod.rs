#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, Utc};
use content_store::application::services::ContentService;
use content_store::domain::entities::{
    NewPage, NewRedirect, Page, PageChanges, Redirect, RedirectChanges,
};
use content_store::domain::repositories::{PageRepository, RedirectRepository};
use content_store::error::AppError;
use sqlx::PgPool;
use std::sync::{Arc, Mutex};

/// In-memory page store with the same lookup and ordering rules as PostgreSQL.
///
/// Each insert is stamped one second after the previous one so ordering by
/// `created_date` is deterministic.
#[derive(Default)]
pub struct MemoryPageRepository {
    rows: Mutex<Vec<Page>>,
}

impl MemoryPageRepository {
    pub fn snapshot(&self) -> Vec<Page> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageRepository for MemoryPageRepository {
    async fn create(&self, new_page: NewPage) -> Result<Page, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.len() as i64 + 1;
        let page = Page::new(
            id,
            new_page.url,
            new_page.title,
            new_page.contents,
            new_page.creating_user,
            new_page.is_shared,
            Utc::now() + Duration::seconds(id),
        );
        rows.push(page.clone());
        Ok(page)
    }

    async fn find_by_url(&self, url: &str, allow_shared: bool) -> Result<Option<Page>, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|p| p.url == url)
            .filter(|p| allow_shared || !p.is_shared())
            .min_by_key(|p| p.id)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Page>, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Page>, AppError> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| (b.created_date, b.id).cmp(&(a.created_date, a.id)));
        Ok(rows)
    }

    async fn update(&self, id: i64, changes: PageChanges) -> Result<Option<Page>, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(page) = rows.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        page.title = changes.title;
        page.url = changes.url;
        page.contents = changes.contents;
        page.is_shared = changes.is_shared;
        Ok(Some(page.clone()))
    }
}

/// In-memory redirect store.
#[derive(Default)]
pub struct MemoryRedirectRepository {
    rows: Mutex<Vec<Redirect>>,
}

impl MemoryRedirectRepository {
    pub fn snapshot(&self) -> Vec<Redirect> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl RedirectRepository for MemoryRedirectRepository {
    async fn create(&self, new_redirect: NewRedirect) -> Result<Redirect, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.len() as i64 + 1;
        let redirect = Redirect::new(
            id,
            new_redirect.name,
            new_redirect.short_url,
            new_redirect.url,
            new_redirect.creating_user,
            Utc::now() + Duration::seconds(id),
        );
        rows.push(redirect.clone());
        Ok(redirect)
    }

    async fn find_by_short_url(&self, short_url: &str) -> Result<Option<Redirect>, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|r| r.short_url == short_url).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Redirect>, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|r| r.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Redirect>, AppError> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| (b.created_date, b.id).cmp(&(a.created_date, a.id)));
        Ok(rows)
    }

    async fn update(
        &self,
        id: i64,
        changes: RedirectChanges,
    ) -> Result<Option<Redirect>, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(redirect) = rows.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };

        redirect.name = changes.name;
        redirect.short_url = changes.short_url;
        redirect.url = changes.url;
        Ok(Some(redirect.clone()))
    }
}

pub type MemoryContentService = ContentService<MemoryPageRepository, MemoryRedirectRepository>;

/// Builds a service over fresh in-memory stores, returning the stores for inspection.
pub fn create_memory_service() -> (
    MemoryContentService,
    Arc<MemoryPageRepository>,
    Arc<MemoryRedirectRepository>,
) {
    let pages = Arc::new(MemoryPageRepository::default());
    let redirects = Arc::new(MemoryRedirectRepository::default());
    let service = ContentService::new(pages.clone(), redirects.clone());
    (service, pages, redirects)
}

pub async fn create_test_page(pool: &PgPool, url: &str, is_shared: Option<bool>) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO pages (url, title, contents, creating_user, is_shared) VALUES ($1, 'Title', 'Body', 'a@b.com', $2) RETURNING id",
    )
    .bind(url)
    .bind(is_shared)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_redirect(pool: &PgPool, short_url: &str, url: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO redirects (name, short_url, url, creating_user) VALUES ('Test', $1, $2, 'a@b.com') RETURNING id",
    )
    .bind(short_url)
    .bind(url)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn count_rows(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}
