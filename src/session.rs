//! Current-session accessor.
//!
//! Sessions are identified by an opaque cookie value and hold a snapshot of
//! the logged-in user. Authentication itself is outside this service; the
//! login flow that populates the store lives elsewhere, and tests seed it
//! directly.

use std::collections::HashMap;
use std::sync::Mutex;

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use uuid::Uuid;

use crate::db::users::User;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "mj_session";

/// Extracts the session id from the request's cookie header, if present.
pub fn session_id(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

/// Generates a fresh session id.
pub fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}

/// In-memory map from session id to the logged-in user's snapshot.
#[derive(Default)]
pub struct SessionStore {
    inner: Mutex<HashMap<String, User>>,
}

impl SessionStore {
    pub fn new() -> Self {
        SessionStore::default()
    }

    /// Starts a session for the given user and returns its id.
    pub fn create(&self, user: User) -> String {
        let sid = new_session_id();
        self.lock().insert(sid.clone(), user);
        sid
    }

    /// Resolves the logged-in user for a session, if any.
    pub fn current(&self, sid: &str) -> Option<User> {
        self.lock().get(sid).cloned()
    }

    /// Replaces the session's user snapshot, e.g. after a refresh.
    pub fn update(&self, sid: &str, user: User) {
        self.lock().insert(sid.to_string(), user);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, User>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(login: &str) -> User {
        User {
            id: 1,
            name: "Test".to_string(),
            login: login.to_string(),
        }
    }

    #[test]
    fn create_and_resolve_session() {
        let store = SessionStore::new();
        let sid = store.create(user("alice"));
        assert_eq!(store.current(&sid).unwrap().login, "alice");
        assert!(store.current("unknown").is_none());
    }

    #[test]
    fn session_id_is_parsed_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, "other=1; mj_session=abc123".parse().unwrap());
        assert_eq!(session_id(&headers).as_deref(), Some("abc123"));

        let empty = HeaderMap::new();
        assert!(session_id(&empty).is_none());
    }

    #[test]
    fn update_replaces_the_snapshot() {
        let store = SessionStore::new();
        let sid = store.create(user("bob"));
        let mut refreshed = user("bob");
        refreshed.name = "Robert".to_string();
        store.update(&sid, refreshed);
        assert_eq!(store.current(&sid).unwrap().name, "Robert");
    }
}
