//! # Content Store
//!
//! PostgreSQL-backed access layer for a website's CMS pages and short-URL
//! redirects.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Page and redirect entities, repository traits, seed data
//! - **Application Layer** ([`application`]) - [`ContentService`], the normalized access API
//! - **Infrastructure Layer** ([`infrastructure`]) - PostgreSQL repositories
//!
//! Every service call is one unit of work: a pooled connection or transaction
//! is taken for the call and released before it returns.
//!
//! ## Quick Start
//!
//! ```no_run
//! use content_store::config;
//! use content_store::state::AppState;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = config::load_from_env()?;
//! let state = AppState::connect(&config).await?;
//!
//! if let Some(redirect) = state.content_service.get_redirect(" Courses ").await? {
//!     println!("{} -> {}", redirect.short_url, redirect.url);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! Loaded from environment variables via [`config::Config`].

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod state;
pub mod utils;

pub mod config;

pub use application::services::ContentService;
pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::ContentService;
    pub use crate::domain::entities::{
        NewPage, NewRedirect, Page, PageChanges, Redirect, RedirectChanges,
    };
    pub use crate::domain::repositories::{PageRepository, RedirectRepository};
    pub use crate::domain::seed::{SeedData, SeedReport};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
