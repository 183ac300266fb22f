//! Redirect entity representing a short URL mapping.

use chrono::{DateTime, Utc};

use crate::utils::normalize::normalize_key;

/// A short URL (e.g. `courses`) that forwards to a destination URL.
///
/// `short_url` is the lookup key and is stored trimmed and lower-cased.
/// The destination `url` is only trimmed, its case is kept.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Redirect {
    pub id: i64,
    pub name: String,
    pub short_url: String,
    pub url: String,
    pub creating_user: String,
    pub created_date: DateTime<Utc>,
}

impl Redirect {
    /// Creates a new Redirect instance.
    pub fn new(
        id: i64,
        name: String,
        short_url: String,
        url: String,
        creating_user: String,
        created_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            short_url,
            url,
            creating_user,
            created_date,
        }
    }
}

/// Input data for creating a new redirect.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRedirect {
    pub name: String,
    pub short_url: String,
    pub url: String,
    pub creating_user: String,
}

impl NewRedirect {
    /// Builds a normalized redirect from raw user input.
    pub fn normalized(name: &str, short_url: &str, url: &str, creating_user: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            short_url: normalize_key(short_url),
            url: url.trim().to_string(),
            creating_user: creating_user.to_string(),
        }
    }
}

/// Replacement values for the mutable fields of a redirect.
#[derive(Debug, Clone, PartialEq)]
pub struct RedirectChanges {
    pub name: String,
    pub short_url: String,
    pub url: String,
}

impl RedirectChanges {
    /// Builds normalized changes with the same rules as [`NewRedirect::normalized`].
    pub fn normalized(name: &str, short_url: &str, url: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            short_url: normalize_key(short_url),
            url: url.trim().to_string(),
        }
    }
}
