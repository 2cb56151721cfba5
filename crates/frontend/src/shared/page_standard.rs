//! Page category constants.
//!
//! Every routed page declares:
//!   - HTML `id` in the format `{entity}--{category}` (e.g. `"a001_category--tree"`)
//!   - `data-page-category` with one of the constants below
//!
//! The entity part matches the module directory, so an id copied from the DOM
//! inspector leads straight to the code.

/// Table with filters/pagination.
pub const PAGE_CAT_LIST: &str = "list";

/// Hierarchical view with drag-and-drop.
pub const PAGE_CAT_TREE: &str = "tree";

/// Landing page with summary cards.
pub const PAGE_CAT_DASHBOARD: &str = "dashboard";

/// Store administration page (settings).
pub const PAGE_CAT_SYSTEM: &str = "system";

/// Sign-in screen, rendered outside the shell.
pub const PAGE_CAT_AUTH: &str = "auth";

pub const ALL_CATEGORIES: &[&str] = &[
    PAGE_CAT_LIST,
    PAGE_CAT_TREE,
    PAGE_CAT_DASHBOARD,
    PAGE_CAT_SYSTEM,
    PAGE_CAT_AUTH,
];

/// Validate that a page id matches the `{entity}--{category}` format.
pub fn is_valid_page_id(id: &str) -> bool {
    matches!(id.split_once("--"), Some((entity, cat)) if !entity.is_empty() && !cat.is_empty())
}

pub fn is_known_category(cat: &str) -> bool {
    ALL_CATEGORIES.contains(&cat)
}

/// Root CSS class for a category, with the BEM modifier where one applies
pub fn page_class(category: &str) -> &'static str {
    match category {
        PAGE_CAT_TREE => "page page--tree",
        PAGE_CAT_DASHBOARD => "page page--dashboard",
        PAGE_CAT_AUTH => "page page--auth",
        _ => "page",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_format() {
        assert!(is_valid_page_id("a001_category--tree"));
        assert!(!is_valid_page_id("a001_category"));
        assert!(!is_valid_page_id("--tree"));
    }

    #[test]
    fn test_page_class() {
        assert!(is_known_category(PAGE_CAT_SYSTEM));
        assert!(!is_known_category("legacy"));
        assert_eq!(page_class(PAGE_CAT_TREE), "page page--tree");
        assert_eq!(page_class(PAGE_CAT_LIST), "page");
    }
}
