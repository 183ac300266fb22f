//! Repository trait definitions for the domain layer.
//!
//! These traits are the store handle injected into
//! [`crate::application::services::ContentService`]. Each method is one unit of
//! work: implementations open a session, run a single query or commit, and
//! release the session before returning.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`PageRepository`] - Content page storage
//! - [`RedirectRepository`] - Short URL redirect storage
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod page_repository;
pub mod redirect_repository;

pub use page_repository::PageRepository;
pub use redirect_repository::RedirectRepository;

#[cfg(test)]
pub use page_repository::MockPageRepository;
#[cfg(test)]
pub use redirect_repository::MockRedirectRepository;
