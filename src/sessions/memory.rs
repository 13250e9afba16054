// src/sessions/memory.rs
//! In-process session store used by tests and `SESSION_STORE=memory`

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::store::{SessionError, SessionRecord, SessionStore};

#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    records: Arc<RwLock<HashMap<String, SessionRecord>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn find(&self, token: &str) -> Result<Option<SessionRecord>, SessionError> {
        let records = self.records.read().await;
        Ok(records
            .get(token)
            .filter(|record| !record.is_expired())
            .cloned())
    }

    async fn commit(&self, token: &str, record: &SessionRecord) -> Result<(), SessionError> {
        self.records
            .write()
            .await
            .insert(token.to_string(), record.clone());
        Ok(())
    }

    async fn delete(&self, token: &str) -> Result<(), SessionError> {
        self.records.write().await.remove(token);
        Ok(())
    }
}
