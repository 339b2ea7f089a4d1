//! Session-scoped storage.
//!
//! Values written here live only as long as the browsing session (for the
//! terminal front end: the process). Keys are namespaced by a generated
//! session id so several sessions can share one backing store.

use crate::{cache_key, Cache, CacheError, KeyValueStore, MemoryStore};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A unique session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Create a new session ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random session ID.
    pub fn generate() -> Self {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
        use rand::Rng;

        let bytes: [u8; 18] = rand::thread_rng().gen();
        Self(format!("sess_{}", URL_SAFE_NO_PAD.encode(bytes)))
    }

    /// Get the session ID as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Typed, session-namespaced key-value access.
pub struct SessionStore<S = MemoryStore> {
    id: SessionId,
    cache: Cache<S>,
}

impl SessionStore<MemoryStore> {
    /// A fresh in-memory session with a generated id.
    pub fn ephemeral() -> Self {
        Self::new(SessionId::generate(), MemoryStore::new())
    }
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Create a session view over `store`.
    pub fn new(id: SessionId, store: S) -> Self {
        Self {
            id,
            cache: Cache::new(store),
        }
    }

    /// The session id keys are namespaced under.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Read a session value.
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, CacheError> {
        self.cache.get(&self.key(name))
    }

    /// Write a session value.
    pub fn set<T: Serialize>(&self, name: &str, value: &T) -> Result<(), CacheError> {
        self.cache.set(&self.key(name), value)
    }

    /// Remove a session value.
    pub fn remove(&self, name: &str) -> Result<(), CacheError> {
        self.cache.delete(&self.key(name))
    }

    /// Remove every value belonging to this session.
    pub fn clear(&self) -> Result<(), CacheError> {
        let prefix = cache_key!("session", self.id, "");
        for key in self.cache.keys()? {
            if key.starts_with(&prefix) {
                self.cache.delete(&key)?;
            }
        }
        Ok(())
    }

    fn key(&self, name: &str) -> String {
        cache_key!("session", self.id, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_session_id_generate_format() {
        let id = SessionId::generate();
        let s = id.as_str();

        assert!(s.starts_with("sess_"));
        // 18 bytes base64 without padding = 24 chars
        assert_eq!(s.len(), 29);
    }

    #[test]
    fn test_session_id_generate_uniqueness() {
        let id1 = SessionId::generate();
        let id2 = SessionId::generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_session_id_serialization() {
        let id = SessionId::new("serialize-me");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""serialize-me""#);
    }

    #[test]
    fn test_session_value_roundtrip() {
        let session = SessionStore::ephemeral();
        session
            .set("shippingAddress", &"Jane Doe, 1 Main St".to_string())
            .unwrap();

        let got: Option<String> = session.get("shippingAddress").unwrap();
        assert_eq!(got.as_deref(), Some("Jane Doe, 1 Main St"));
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = Arc::new(MemoryStore::new());
        let a = SessionStore::new(SessionId::new("a"), Arc::clone(&store));
        let b = SessionStore::new(SessionId::new("b"), Arc::clone(&store));

        a.set("shippingAddress", &"A").unwrap();

        let from_b: Option<String> = b.get("shippingAddress").unwrap();
        assert!(from_b.is_none());
        assert!(store.exists("session:a:shippingAddress").unwrap());
    }

    #[test]
    fn test_clear_only_touches_own_session() {
        let store = Arc::new(MemoryStore::new());
        let a = SessionStore::new(SessionId::new("a"), Arc::clone(&store));
        let b = SessionStore::new(SessionId::new("b"), Arc::clone(&store));
        a.set("x", &1).unwrap();
        b.set("x", &2).unwrap();

        a.clear().unwrap();

        assert!(a.get::<i32>("x").unwrap().is_none());
        assert_eq!(b.get::<i32>("x").unwrap(), Some(2));
    }
}
