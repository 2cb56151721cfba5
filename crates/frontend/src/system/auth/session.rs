//! The bearer token and where it lives.
//!
//! Two stores hold the token: localStorage for script access and a cookie for
//! the first request of a fresh page load. [`Session::sync`] reconciles them
//! on every access. localStorage is authoritative; a token found only in the
//! cookie is copied back to localStorage.

use super::storage::{CookieStore, LocalStorageStore};

pub trait TokenStore {
    fn read(&self) -> Option<String>;
    fn write(&self, token: &str);
    fn clear(&self);
}

#[derive(Debug, Clone, Default)]
pub struct Session<P: TokenStore, M: TokenStore> {
    primary: P,
    mirror: M,
}

pub type BrowserSession = Session<LocalStorageStore, CookieStore>;

/// Session backed by the browser stores
pub fn browser_session() -> BrowserSession {
    Session::new(LocalStorageStore, CookieStore)
}

impl<P: TokenStore, M: TokenStore> Session<P, M> {
    pub fn new(primary: P, mirror: M) -> Self {
        Self { primary, mirror }
    }

    /// Makes both stores agree and returns the resulting token
    pub fn sync(&self) -> Option<String> {
        match (self.primary.read(), self.mirror.read()) {
            (Some(token), mirrored) => {
                if mirrored.as_deref() != Some(token.as_str()) {
                    self.mirror.write(&token);
                }
                Some(token)
            }
            (None, Some(token)) => {
                self.primary.write(&token);
                Some(token)
            }
            (None, None) => None,
        }
    }

    pub fn token(&self) -> Option<String> {
        self.sync()
    }

    pub fn has_token(&self) -> bool {
        self.sync().is_some()
    }

    pub fn set_token(&self, token: &str) {
        self.primary.write(token);
        self.mirror.write(token);
    }

    pub fn clear(&self) {
        self.primary.clear();
        self.mirror.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct MemoryStore(Rc<RefCell<Option<String>>>);

    impl MemoryStore {
        fn with(token: &str) -> Self {
            Self(Rc::new(RefCell::new(Some(token.to_string()))))
        }

        fn get(&self) -> Option<String> {
            self.0.borrow().clone()
        }
    }

    impl TokenStore for MemoryStore {
        fn read(&self) -> Option<String> {
            self.get()
        }

        fn write(&self, token: &str) {
            *self.0.borrow_mut() = Some(token.to_string());
        }

        fn clear(&self) {
            *self.0.borrow_mut() = None;
        }
    }

    #[test]
    fn test_primary_wins_on_disagreement() {
        let (local, cookie) = (MemoryStore::with("new"), MemoryStore::with("old"));
        let session = Session::new(local.clone(), cookie.clone());
        assert_eq!(session.token(), Some("new".to_string()));
        assert_eq!(cookie.get(), Some("new".to_string()));
    }

    #[test]
    fn test_cookie_only_token_is_copied_back() {
        let (local, cookie) = (MemoryStore::default(), MemoryStore::with("from-cookie"));
        let session = Session::new(local.clone(), cookie.clone());
        assert!(session.has_token());
        assert_eq!(local.get(), Some("from-cookie".to_string()));
    }

    #[test]
    fn test_set_and_clear_write_through() {
        let (local, cookie) = (MemoryStore::default(), MemoryStore::default());
        let session = Session::new(local.clone(), cookie.clone());
        assert_eq!(session.token(), None);

        session.set_token("t1");
        assert_eq!(local.get(), Some("t1".to_string()));
        assert_eq!(cookie.get(), Some("t1".to_string()));

        session.clear();
        assert_eq!(local.get(), None);
        assert_eq!(cookie.get(), None);
        assert!(!session.has_token());
    }
}
