//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with bound
//! parameters. Every method holds its own session: reads check out a pooled
//! connection, writes run inside a transaction. Both are returned to the pool
//! when dropped, so early returns and errors release them too.
//!
//! # Repositories
//!
//! - [`PgPageRepository`] - Content page storage and retrieval
//! - [`PgRedirectRepository`] - Redirect storage and retrieval

pub mod pg_page_repository;
pub mod pg_redirect_repository;

pub use pg_page_repository::PgPageRepository;
pub use pg_redirect_repository::PgRedirectRepository;
