//! Core domain entities representing the stored content model.
//!
//! Entities are plain data structures mapped one-to-one onto store rows.
//!
//! # Entity Types
//!
//! - [`Page`] - A static content document addressed by its URL path
//! - [`Redirect`] - A short URL pointing at a destination URL
//!
//! # Design Pattern
//!
//! Each entity has companion input structs:
//! - `NewPage`, `NewRedirect` - For creating new records
//! - `PageChanges`, `RedirectChanges` - For overwriting the mutable fields of an existing record

pub mod page;
pub mod redirect;

pub use page::{NewPage, Page, PageChanges};
pub use redirect::{NewRedirect, Redirect, RedirectChanges};
