use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A bearer token plus the user profile returned at login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: Value,
}

/// Token/profile store: set at login, cleared on logout or any 401.
///
/// In-memory by default; the CLI attaches a YAML file so sessions survive
/// between invocations, the way the browser frontends kept theirs in local
/// storage.
pub struct SessionStore {
    inner: RwLock<Option<Session>>,
    path: Option<PathBuf>,
}

impl SessionStore {
    pub fn in_memory() -> Self {
        Self {
            inner: RwLock::new(None),
            path: None,
        }
    }

    /// Backed by a YAML file; an existing session is loaded eagerly.
    pub fn persistent(path: PathBuf) -> Self {
        let existing = std::fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_yaml::from_str::<Session>(&raw).ok());
        Self {
            inner: RwLock::new(existing),
            path: Some(path),
        }
    }

    pub fn set(&self, session: Session) {
        if let Some(path) = &self.path {
            if let Ok(raw) = serde_yaml::to_string(&session) {
                if let Some(parent) = path.parent() {
                    let _ = std::fs::create_dir_all(parent);
                }
                if let Err(e) = std::fs::write(path, raw) {
                    tracing::warn!("failed to persist session: {}", e);
                }
            }
        }
        *self.inner.write().unwrap_or_else(|e| e.into_inner()) = Some(session);
    }

    pub fn token(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<Value> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|s| s.user.clone())
    }

    /// Token presence only; expiry is the server's call.
    pub fn is_authenticated(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    pub fn clear(&self) {
        if let Some(path) = &self.path {
            let _ = std::fs::remove_file(path);
        }
        *self.inner.write().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lifecycle() {
        let store = SessionStore::in_memory();
        assert!(!store.is_authenticated());

        store.set(Session {
            token: "tok".into(),
            user: json!({"id": 1}),
        });
        assert!(store.is_authenticated());
        assert_eq!(store.token().as_deref(), Some("tok"));

        store.clear();
        assert!(!store.is_authenticated());
        assert!(store.token().is_none());
    }

    #[test]
    fn test_persistent_round_trip() {
        let dir = std::env::temp_dir().join(format!("opsdesk-session-{}", std::process::id()));
        let path = dir.join("session.yaml");

        let store = SessionStore::persistent(path.clone());
        store.set(Session {
            token: "tok".into(),
            user: json!({"id": 7, "name": "Casey"}),
        });

        let reloaded = SessionStore::persistent(path.clone());
        assert!(reloaded.is_authenticated());
        assert_eq!(reloaded.token().as_deref(), Some("tok"));

        reloaded.clear();
        assert!(!SessionStore::persistent(path).is_authenticated());
        let _ = std::fs::remove_dir_all(dir);
    }
}
