// src/sessions/session.rs
//! Request-scoped session handle

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

use super::store::{SessionError, SessionStore};
use crate::common::AppError;

pub(crate) fn generate_token() -> String {
    Uuid::new_v4().simple().to_string()
}

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    values: HashMap<String, Value>,
    modified: bool,
}

/// Session data for the current request.
///
/// Cloning shares the same underlying state. Changes are written back to the
/// store by the session middleware once the handler returns.
#[derive(Clone)]
pub struct Session {
    state: Arc<Mutex<SessionState>>,
    store: Arc<dyn SessionStore>,
}

impl Session {
    pub(crate) fn new(
        store: Arc<dyn SessionStore>,
        token: Option<String>,
        values: HashMap<String, Value>,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState {
                token,
                values,
                modified: false,
            })),
            store,
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn put(&self, key: &str, value: impl Into<Value>) {
        let mut state = self.lock();
        state.values.insert(key.to_string(), value.into());
        state.modified = true;
    }

    #[cfg(test)]
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.lock()
            .values
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.lock().values.get(key).and_then(Value::as_i64)
    }

    #[cfg(test)]
    pub fn exists(&self, key: &str) -> bool {
        self.lock().values.contains_key(key)
    }

    /// Returns the string stored under `key` and removes it.
    ///
    /// Non-string values are left untouched.
    pub fn pop_string(&self, key: &str) -> Option<String> {
        let mut state = self.lock();
        let value = state.values.get(key).and_then(Value::as_str)?.to_string();
        state.values.remove(key);
        state.modified = true;
        Some(value)
    }

    pub fn remove(&self, key: &str) {
        let mut state = self.lock();
        if state.values.remove(key).is_some() {
            state.modified = true;
        }
    }

    /// Moves the session data to a fresh token and deletes the old record.
    pub async fn renew_token(&self) -> Result<(), SessionError> {
        let old_token = {
            let mut state = self.lock();
            let old = state.token.replace(generate_token());
            state.modified = true;
            old
        };

        if let Some(old) = old_token {
            self.store.delete(&old).await?;
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn token(&self) -> Option<String> {
        self.lock().token.clone()
    }

    #[cfg(test)]
    pub fn is_modified(&self) -> bool {
        self.lock().modified
    }

    /// Token and values to persist, or `None` when nothing changed.
    ///
    /// A token is issued here for sessions that never had one.
    pub(crate) fn take_changes(&self) -> Option<(String, HashMap<String, Value>)> {
        let mut state = self.lock();
        if !state.modified {
            return None;
        }
        state.modified = false;
        let token = state.token.get_or_insert_with(generate_token).clone();
        Some((token, state.values.clone()))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::InternalServer("session layer is not installed".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sessions::memory::MemorySessionStore;
    use crate::sessions::store::SessionRecord;
    use chrono::{Duration, Utc};

    fn fresh(store: &MemorySessionStore, token: Option<&str>) -> Session {
        Session::new(
            Arc::new(store.clone()),
            token.map(str::to_string),
            HashMap::new(),
        )
    }

    #[test]
    fn test_put_and_pop_string() {
        let session = fresh(&MemorySessionStore::new(), None);
        assert!(!session.is_modified());

        session.put("flash", "Saved!");
        assert!(session.is_modified());
        assert_eq!(session.get_string("flash"), Some("Saved!".to_string()));

        assert_eq!(session.pop_string("flash"), Some("Saved!".to_string()));
        assert_eq!(session.pop_string("flash"), None);
        assert!(!session.exists("flash"));
    }

    #[test]
    fn test_pop_string_ignores_other_types() {
        let session = fresh(&MemorySessionStore::new(), None);
        session.put("authenticatedUserID", 3);
        assert_eq!(session.pop_string("authenticatedUserID"), None);
        assert_eq!(session.get_i64("authenticatedUserID"), Some(3));
    }

    #[test]
    fn test_reading_does_not_modify() {
        let session = Session::new(
            Arc::new(MemorySessionStore::new()),
            Some("tok".to_string()),
            HashMap::from([("flash".to_string(), "hi".into())]),
        );
        assert_eq!(session.get_string("flash"), Some("hi".to_string()));
        assert!(session.exists("flash"));
        session.remove("missing");
        assert!(!session.is_modified());
        assert!(session.take_changes().is_none());
    }

    #[test]
    fn test_take_changes_issues_token() {
        let session = fresh(&MemorySessionStore::new(), None);
        session.put("flash", "hello");

        let (token, values) = session.take_changes().unwrap();
        assert!(!token.is_empty());
        assert_eq!(session.token(), Some(token));
        assert_eq!(values.get("flash"), Some(&Value::from("hello")));
        assert!(session.take_changes().is_none());
    }

    #[tokio::test]
    async fn test_renew_token_deletes_old_record() {
        let store = MemorySessionStore::new();
        store
            .commit(
                "old-token",
                &SessionRecord {
                    values: HashMap::new(),
                    expires_at: Utc::now() + Duration::hours(1),
                },
            )
            .await
            .unwrap();

        let session = fresh(&store, Some("old-token"));
        session.renew_token().await.unwrap();

        let new_token = session.token().unwrap();
        assert_ne!(new_token, "old-token");
        assert!(session.is_modified());
        assert!(store.find("old-token").await.unwrap().is_none());
    }
}
