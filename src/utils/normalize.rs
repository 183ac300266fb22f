//! Input normalization for lookup keys and free-text fields.
//!
//! Page URLs and redirect short URLs are compared by exact string equality in
//! the store, so every value is normalized the same way before it is written
//! or queried.

/// Normalizes a URL lookup key: surrounding whitespace removed, lower-cased.
///
/// An empty input stays empty.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_key("  Company/History "), "company/history");
/// assert_eq!(normalize_key(""), "");
/// ```
pub fn normalize_key(url: &str) -> String {
    url.trim().to_lowercase()
}

/// Trims an optional text field, keeping `None` as `None`.
pub fn trim_optional(value: Option<&str>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}
