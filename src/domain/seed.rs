//! Starter content for a fresh database.
//!
//! [`SeedData::defaults`] holds the pages and redirects a new site starts with.
//! Operators can supply their own set as JSON in the same shape:
//!
//! ```json
//! {
//!   "pages": [{ "url": "company/history", "title": "Company history", "contents": "..." }],
//!   "redirects": [{ "name": "Courses", "short_url": "courses", "url": "https://..." }]
//! }
//! ```

use serde::Deserialize;

/// A page entry in a seed set.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeedPage {
    pub url: String,
    pub title: Option<String>,
    pub contents: Option<String>,
    #[serde(default)]
    pub is_shared: Option<bool>,
}

/// A redirect entry in a seed set.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeedRedirect {
    pub name: String,
    pub short_url: String,
    pub url: String,
}

/// A set of pages and redirects to import.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub pages: Vec<SeedPage>,
    #[serde(default)]
    pub redirects: Vec<SeedRedirect>,
}

impl SeedData {
    /// The built-in starter content.
    pub fn defaults() -> Self {
        Self {
            pages: vec![
                SeedPage {
                    url: "company/history".to_string(),
                    title: Some("Company history".to_string()),
                    contents: Some("Details about company history...".to_string()),
                    is_shared: None,
                },
                SeedPage {
                    url: "company/employees".to_string(),
                    title: Some("Our team".to_string()),
                    contents: Some("Details about company employees ...".to_string()),
                    is_shared: None,
                },
            ],
            redirects: vec![
                SeedRedirect {
                    name: "Courses".to_string(),
                    short_url: "courses".to_string(),
                    url: "https://training.talkpython.fm/courses/all".to_string(),
                },
                SeedRedirect {
                    name: "Python Bytes".to_string(),
                    short_url: "bytes".to_string(),
                    url: "https://pythonbytes.fm/".to_string(),
                },
            ],
        }
    }

    /// Parses a seed set from JSON. Missing `pages` or `redirects` mean empty.
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty() && self.redirects.is_empty()
    }
}

/// Outcome of an import: what was created and what already existed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub pages_created: usize,
    pub pages_skipped: usize,
    pub redirects_created: usize,
    pub redirects_skipped: usize,
}
