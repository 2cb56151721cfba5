//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

use wasm_bindgen::JsCast;

/// `<meta name="admin-api-base" content="https://api.example.com/api">` overrides the default
pub const API_BASE_META: &str = "admin-api-base";

/// Backend port used when no meta tag is present
pub const DEFAULT_API_PORT: u16 = 8000;

/// Get the base URL for API requests
///
/// Reads the `admin-api-base` meta tag if the page has one, otherwise derives
/// the URL from the current window location on port 8000.
///
/// # Returns
/// - API base URL like "http://localhost:8000/api"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };

    let from_meta = window
        .document()
        .and_then(|doc| {
            doc.query_selector(&format!("meta[name=\"{}\"]", API_BASE_META))
                .ok()
                .flatten()
        })
        .and_then(|el| el.dyn_into::<web_sys::HtmlMetaElement>().ok())
        .map(|meta| meta.content())
        .filter(|content| !content.trim().is_empty());
    if let Some(base) = from_meta {
        return base.trim_end_matches('/').to_string();
    }

    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    default_api_base(&protocol, &hostname)
}

/// `{protocol}//{hostname}:8000/api`
pub fn default_api_base(protocol: &str, hostname: &str) -> String {
    format!("{}//{}:{}/api", protocol, hostname, DEFAULT_API_PORT)
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/categories/12");
/// ```
pub fn api_url(path: &str) -> String {
    join_url(&api_base(), path)
}

/// Joins base and path with exactly one slash between them
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_api_base() {
        assert_eq!(
            default_api_base("https:", "admin.example.com"),
            "https://admin.example.com:8000/api"
        );
    }

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://h:8000/api/", "/categories"),
            "http://h:8000/api/categories"
        );
        assert_eq!(
            join_url("http://h:8000/api", "settings?page=1"),
            "http://h:8000/api/settings?page=1"
        );
    }
}
