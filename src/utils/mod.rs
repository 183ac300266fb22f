//! Utility functions shared by entities and services.
//!
//! - [`normalize`] - Lookup key and free-text normalization
//! - [`db_error`] - Classification of store errors

pub mod db_error;
pub mod normalize;
