//! Route gating by path prefix.
//!
//! The same decision is made for the initial page load (the token cookie) and
//! for in-app navigation (the session), so it is kept free of any browser API.

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// Sections that need a signed-in admin. `/` itself is gated too.
pub const PROTECTED_PREFIXES: &[&str] = &[
    "/categories",
    "/notifications",
    "/settings",
    "/products",
    "/brands",
    "/orders",
    "/users",
    "/banners",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    /// Send to login, remembering where the user wanted to go
    RedirectToLogin { redirect: String },
    /// Already signed in, no reason to see the login page
    RedirectHome,
}

/// Prefix match on whole segments: `/settings` gates `/settings/seo`, not `/settingsx`
pub fn is_protected(path: &str) -> bool {
    let path = normalize(path);
    path == HOME_PATH
        || PROTECTED_PREFIXES
            .iter()
            .any(|prefix| path == *prefix || path.starts_with(&format!("{}/", prefix)))
}

pub fn decide(path: &str, has_session: bool) -> GateDecision {
    let path = normalize(path);
    if path == LOGIN_PATH {
        return if has_session {
            GateDecision::RedirectHome
        } else {
            GateDecision::Allow
        };
    }
    if !has_session && is_protected(&path) {
        return GateDecision::RedirectToLogin { redirect: path };
    }
    GateDecision::Allow
}

/// Login URL with the return path as a query parameter
pub fn login_url(redirect: &str) -> String {
    if redirect == HOME_PATH {
        LOGIN_PATH.to_string()
    } else {
        format!("{}?redirect={}", LOGIN_PATH, urlencoding::encode(redirect))
    }
}

/// Where to go after a successful login. Only local, protected paths are
/// honoured; anything else goes home.
pub fn post_login_target(redirect: Option<&str>) -> String {
    match redirect {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && is_protected(path) => {
            normalize(path)
        }
        _ => HOME_PATH.to_string(),
    }
}

fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or("");
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        HOME_PATH.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_prefixes() {
        assert!(is_protected("/"));
        assert!(is_protected("/categories"));
        assert!(is_protected("/settings/"));
        assert!(is_protected("/orders/15?tab=items"));
        assert!(!is_protected("/settingsx"));
        assert!(!is_protected("/login"));
        assert!(!is_protected("/assets/app.css"));
    }

    #[test]
    fn test_decide() {
        assert_eq!(
            decide("/notifications", false),
            GateDecision::RedirectToLogin {
                redirect: "/notifications".to_string()
            }
        );
        assert_eq!(decide("/notifications", true), GateDecision::Allow);
        assert_eq!(decide("/login", true), GateDecision::RedirectHome);
        assert_eq!(decide("/login/", false), GateDecision::Allow);
        assert_eq!(decide("/favicon.ico", false), GateDecision::Allow);
    }

    #[test]
    fn test_login_url_and_target() {
        assert_eq!(login_url("/"), "/login");
        assert_eq!(login_url("/settings"), "/login?redirect=%2Fsettings");
        assert_eq!(
            login_url("/orders/a&b=c#x"),
            "/login?redirect=%2Forders%2Fa%26b%3Dc%23x"
        );
        assert_eq!(post_login_target(Some("/settings")), "/settings");
        assert_eq!(post_login_target(Some("//evil.example")), "/");
        assert_eq!(post_login_target(Some("https://evil.example")), "/");
        assert_eq!(post_login_target(None), "/");
    }
}
