//! File-backed store for the bearer-token pair.
//! The Rust analogue of the browser's persistent local storage: the pair
//! survives process restarts on the same machine, nothing else is persisted.
//! No encryption and no expiry metadata; token lifetime is opaque here.

use std::fs;
use std::path::PathBuf;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
}

/// Owns the stored pair exclusively; every authorized request reads through
/// here and only login/logout/check-auth (and a refresh exchange) write.
pub struct SessionStore {
    path: PathBuf,
    cached: RwLock<Option<Session>>,
}

impl SessionStore {
    /// Open the store at `path`, eagerly loading any previously persisted
    /// session. A missing, unreadable or malformed file is treated as
    /// "no session" and never surfaces to callers.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cached = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Session>(&raw) {
                Ok(s) => Some(s),
                Err(e) => {
                    warn!("session file {} is malformed, ignoring: {}", path.display(), e);
                    None
                }
            },
            Err(_) => None,
        };
        Self { path, cached: RwLock::new(cached) }
    }

    pub fn get(&self) -> Option<Session> {
        self.cached.read().clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.cached.read().as_ref().map(|s| s.access_token.clone())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.cached.read().as_ref().map(|s| s.refresh_token.clone())
    }

    /// Replace the stored pair. Persistence is best-effort: a write failure
    /// is logged and the in-memory session still takes effect.
    pub fn set(&self, session: Session) {
        *self.cached.write() = Some(session.clone());
        self.persist(&session);
    }

    /// Swap in a fresh access token after a refresh exchange, keeping the
    /// refresh token. No-op when no session is stored.
    pub fn set_access_token(&self, access_token: String) {
        let mut guard = self.cached.write();
        if let Some(session) = guard.as_mut() {
            session.access_token = access_token;
            let snapshot = session.clone();
            drop(guard);
            self.persist(&snapshot);
        }
    }

    /// Drop the pair and delete the backing file. Idempotent: clearing an
    /// empty store has no observable effect.
    pub fn clear(&self) {
        let had_session = self.cached.write().take().is_some();
        if had_session || self.path.exists() {
            if let Err(e) = fs::remove_file(&self.path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!("failed to remove session file {}: {}", self.path.display(), e);
                }
            }
        }
    }

    fn persist(&self, session: &Session) {
        let raw = match serde_json::to_string_pretty(session) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("failed to encode session: {}", e);
                return;
            }
        };
        if let Err(e) = fs::write(&self.path, raw) {
            warn!("failed to persist session to {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> Session {
        Session { access_token: "acc".into(), refresh_token: "ref".into() }
    }

    #[test]
    fn set_get_clear_roundtrip() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path().join("session.json"));
        assert_eq!(store.get(), None);

        store.set(sample());
        assert_eq!(store.get(), Some(sample()));
        assert_eq!(store.access_token().as_deref(), Some("acc"));
        assert_eq!(store.refresh_token().as_deref(), Some("ref"));

        store.clear();
        assert_eq!(store.get(), None);
        // idempotent
        store.clear();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        SessionStore::open(&path).set(sample());

        let reopened = SessionStore::open(&path);
        assert_eq!(reopened.get(), Some(sample()));
    }

    #[test]
    fn malformed_file_is_absent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(SessionStore::open(&path).get(), None);
    }

    #[test]
    fn refresh_swaps_access_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = SessionStore::open(&path);
        store.set(sample());
        store.set_access_token("acc2".into());
        let s = store.get().unwrap();
        assert_eq!(s.access_token, "acc2");
        assert_eq!(s.refresh_token, "ref");
        // persisted too
        assert_eq!(SessionStore::open(&path).get().unwrap().access_token, "acc2");
    }

    #[test]
    fn set_access_token_without_session_is_noop() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path().join("session.json"));
        store.set_access_token("orphan".into());
        assert_eq!(store.get(), None);
    }
}
