//! Page entity representing a stored content document.

use chrono::{DateTime, Utc};

use crate::utils::normalize::{normalize_key, trim_optional};

/// A content page served at a site-relative URL such as `company/history`.
///
/// `url` is always stored trimmed and lower-cased. `is_shared` is tri-state:
/// `None` and `Some(false)` both mean "not shared".
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Page {
    pub id: i64,
    pub url: String,
    pub title: Option<String>,
    pub contents: Option<String>,
    pub creating_user: String,
    pub is_shared: Option<bool>,
    pub created_date: DateTime<Utc>,
}

impl Page {
    /// Creates a new Page instance.
    pub fn new(
        id: i64,
        url: String,
        title: Option<String>,
        contents: Option<String>,
        creating_user: String,
        is_shared: Option<bool>,
        created_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            url,
            title,
            contents,
            creating_user,
            is_shared,
            created_date,
        }
    }

    /// Returns true only when the flag is explicitly set.
    pub fn is_shared(&self) -> bool {
        self.is_shared.unwrap_or(false)
    }
}

/// Input data for creating a new page.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPage {
    pub url: String,
    pub title: Option<String>,
    pub contents: Option<String>,
    pub creating_user: String,
    pub is_shared: Option<bool>,
}

impl NewPage {
    /// Builds a normalized page: url trimmed and lower-cased, title and contents trimmed.
    ///
    /// `creating_user` is stored verbatim.
    pub fn normalized(
        title: Option<&str>,
        url: &str,
        contents: Option<&str>,
        creating_user: &str,
        is_shared: Option<bool>,
    ) -> Self {
        Self {
            url: normalize_key(url),
            title: trim_optional(title),
            contents: trim_optional(contents),
            creating_user: creating_user.to_string(),
            is_shared,
        }
    }
}

/// Replacement values for the mutable fields of a page.
///
/// Every field is overwritten, including `None` ones: a `None` title clears it.
#[derive(Debug, Clone, PartialEq)]
pub struct PageChanges {
    pub title: Option<String>,
    pub url: String,
    pub contents: Option<String>,
    pub is_shared: Option<bool>,
}

impl PageChanges {
    /// Builds normalized changes with the same rules as [`NewPage::normalized`].
    pub fn normalized(
        title: Option<&str>,
        url: &str,
        contents: Option<&str>,
        is_shared: Option<bool>,
    ) -> Self {
        Self {
            title: trim_optional(title),
            url: normalize_key(url),
            contents: trim_optional(contents),
            is_shared,
        }
    }
}
