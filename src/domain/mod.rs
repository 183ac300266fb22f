//! Domain layer containing the content model and data-access contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Page and redirect records
//! - [`repositories`] - Data access trait definitions
//! - [`seed`] - Starter content for a fresh database
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure
//! - Repository traits define contracts implemented by infrastructure layer
//! - Normalization and lookup rules live in [`crate::application::services`]

pub mod entities;
pub mod repositories;
pub mod seed;
