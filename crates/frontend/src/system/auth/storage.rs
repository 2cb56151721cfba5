use super::session::TokenStore;
use wasm_bindgen::JsCast;
use web_sys::window;

/// localStorage key of the bearer token
pub const TOKEN_KEY: &str = "admin_token";

/// Cookie mirror, read on first page load before any script state exists
pub const TOKEN_COOKIE: &str = "admin_token";

/// 7 days
pub const TOKEN_COOKIE_MAX_AGE: u32 = 7 * 24 * 60 * 60;

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

fn get_html_document() -> Option<web_sys::HtmlDocument> {
    window()?.document()?.dyn_into::<web_sys::HtmlDocument>().ok()
}

/// Token in localStorage
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl TokenStore for LocalStorageStore {
    fn read(&self) -> Option<String> {
        get_local_storage()?
            .get_item(TOKEN_KEY)
            .ok()?
            .filter(|t| !t.is_empty())
    }

    fn write(&self, token: &str) {
        if let Some(storage) = get_local_storage() {
            let _ = storage.set_item(TOKEN_KEY, token);
        }
    }

    fn clear(&self) {
        if let Some(storage) = get_local_storage() {
            let _ = storage.remove_item(TOKEN_KEY);
        }
    }
}

/// Token in a first-party cookie
#[derive(Debug, Clone, Copy, Default)]
pub struct CookieStore;

impl TokenStore for CookieStore {
    fn read(&self) -> Option<String> {
        let cookies = get_html_document()?.cookie().ok()?;
        parse_cookie(&cookies, TOKEN_COOKIE)
    }

    fn write(&self, token: &str) {
        if let Some(doc) = get_html_document() {
            let _ = doc.set_cookie(&cookie_assignment(TOKEN_COOKIE, token, TOKEN_COOKIE_MAX_AGE));
        }
    }

    fn clear(&self) {
        if let Some(doc) = get_html_document() {
            let _ = doc.set_cookie(&cookie_assignment(TOKEN_COOKIE, "", 0));
        }
    }
}

/// Value of `name` in a `document.cookie` string
pub fn parse_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .and_then(|(_, value)| urlencoding::decode(value).ok())
        .map(|value| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// `document.cookie = ...` string; `max_age` of 0 deletes the cookie
pub fn cookie_assignment(name: &str, value: &str, max_age: u32) -> String {
    format!(
        "{}={}; Path=/; Max-Age={}; SameSite=Lax",
        name,
        urlencoding::encode(value),
        max_age
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cookie() {
        let jar = "theme=dark; admin_token=abc%7C123; lang=ar";
        assert_eq!(parse_cookie(jar, "admin_token"), Some("abc|123".to_string()));
        assert_eq!(parse_cookie(jar, "missing"), None);
        assert_eq!(parse_cookie("admin_token=", "admin_token"), None);
        assert_eq!(parse_cookie("", "admin_token"), None);
    }

    #[test]
    fn test_cookie_assignment() {
        assert_eq!(
            cookie_assignment("admin_token", "abc|123", 60),
            "admin_token=abc%7C123; Path=/; Max-Age=60; SameSite=Lax"
        );
        assert!(cookie_assignment("admin_token", "", 0).contains("Max-Age=0"));
    }
}
