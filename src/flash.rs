//! Flash notices surviving one redirect.
//!
//! The framework-style "include data in a redirect" behavior is modeled as an
//! explicit short-lived server-side store keyed by session id: the
//! registration handler sets the notice, and the next render of the login
//! page takes it. Entries are take-once and expire after a TTL so abandoned
//! redirects do not accumulate.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// How long an unclaimed notice survives.
const DEFAULT_FLASH_TTL_SECS: u64 = 120;

pub struct FlashStore {
    inner: Mutex<HashMap<String, (String, Instant)>>,
    ttl: Duration,
}

impl Default for FlashStore {
    fn default() -> Self {
        FlashStore::with_ttl(Duration::from_secs(DEFAULT_FLASH_TTL_SECS))
    }
}

impl FlashStore {
    pub fn new() -> Self {
        FlashStore::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        FlashStore {
            inner: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Stores a notice for the given session, replacing any previous one.
    ///
    /// Expired entries are swept here so notices abandoned mid-redirect do
    /// not accumulate.
    pub fn set(&self, sid: &str, notice: impl Into<String>) {
        let mut entries = self.lock();
        entries.retain(|_, (_, stored_at)| stored_at.elapsed() < self.ttl);
        entries.insert(sid.to_string(), (notice.into(), Instant::now()));
    }

    /// Removes and returns the notice for the given session, if it exists
    /// and has not expired.
    pub fn take(&self, sid: &str) -> Option<String> {
        let (notice, stored_at) = self.lock().remove(sid)?;
        if stored_at.elapsed() >= self.ttl {
            return None;
        }
        Some(notice)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, (String, Instant)>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_is_delivered_exactly_once() {
        let store = FlashStore::new();
        store.set("sid", "User Nico successfully added");
        assert_eq!(store.take("sid").as_deref(), Some("User Nico successfully added"));
        assert!(store.take("sid").is_none());
    }

    #[test]
    fn notices_are_scoped_to_their_session() {
        let store = FlashStore::new();
        store.set("a", "for a");
        assert!(store.take("b").is_none());
        assert_eq!(store.take("a").as_deref(), Some("for a"));
    }

    #[test]
    fn expired_notice_is_dropped() {
        let store = FlashStore::with_ttl(Duration::ZERO);
        store.set("sid", "too late");
        assert!(store.take("sid").is_none());
    }

    #[test]
    fn expired_entries_are_swept_on_set() {
        let store = FlashStore::with_ttl(Duration::ZERO);
        for i in 0..100 {
            store.set(&format!("sid-{}", i), "abandoned");
        }

        store.set("latest", "pending");

        // Only the entry just inserted survives the sweep.
        assert_eq!(store.lock().len(), 1);
        assert!(store.lock().contains_key("latest"));
    }

    #[test]
    fn live_entries_survive_the_sweep() {
        let store = FlashStore::new();
        store.set("a", "for a");
        store.set("b", "for b");
        assert_eq!(store.lock().len(), 2);
        assert_eq!(store.take("a").as_deref(), Some("for a"));
    }

    #[test]
    fn set_replaces_previous_notice() {
        let store = FlashStore::new();
        store.set("sid", "first");
        store.set("sid", "second");
        assert_eq!(store.take("sid").as_deref(), Some("second"));
    }
}
