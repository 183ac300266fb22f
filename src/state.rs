//! Wiring of the PostgreSQL-backed content service.

use anyhow::{Context, Result};
use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::ContentService;
use crate::config::Config;
use crate::infrastructure::persistence::{PgPageRepository, PgRedirectRepository};

/// Content service backed by PostgreSQL repositories.
pub type PgContentService = ContentService<PgPageRepository, PgRedirectRepository>;

/// Shared handles for one process: the pool and the service built on it.
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<PgPool>,
    pub content_service: Arc<PgContentService>,
}

impl AppState {
    /// Builds the state from an existing pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        let page_repository = Arc::new(PgPageRepository::new(pool.clone()));
        let redirect_repository = Arc::new(PgRedirectRepository::new(pool.clone()));

        Self {
            pool,
            content_service: Arc::new(ContentService::new(page_repository, redirect_repository)),
        }
    }

    /// Connects to the configured database and builds the state.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be reached.
    pub async fn connect(config: &Config) -> Result<Self> {
        let pool = PgPool::connect(&config.database_url)
            .await
            .context("Failed to connect to database")?;
        tracing::info!("Connected to database");

        Ok(Self::new(Arc::new(pool)))
    }
}
