//! Application layer services.
//!
//! Services normalize caller input and coordinate repository calls. They are
//! constructed with their store handles, so callers choose the backing
//! implementation (PostgreSQL in production, mocks or fakes in tests).
//!
//! # Available Services
//!
//! - [`services::content_service::ContentService`] - Page and redirect access

pub mod services;
