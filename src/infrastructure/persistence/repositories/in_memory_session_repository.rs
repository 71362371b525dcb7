use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::application::ports::{RepositoryError, SessionRepository};
use crate::domain::{Session, SessionId};

/// Sessions live in process memory until evicted by `remove_idle`.
#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait::async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, session: &Session) -> Result<(), RepositoryError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.id) {
            return Err(RepositoryError::StorageFailed(format!(
                "session {} already exists",
                session.id
            )));
        }
        sessions.insert(session.id, session.clone());
        Ok(())
    }

    async fn get(&self, id: SessionId) -> Result<Option<Session>, RepositoryError> {
        Ok(self.sessions.read().await.get(&id).cloned())
    }

    async fn save(&self, session: &Session) -> Result<(), RepositoryError> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&session.id) {
            Some(existing) => {
                *existing = session.clone();
                Ok(())
            }
            None => Err(RepositoryError::NotFound(session.id.to_string())),
        }
    }

    async fn delete(&self, id: SessionId) -> Result<(), RepositoryError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    async fn remove_idle(&self, cutoff: DateTime<Utc>) -> Result<Vec<SessionId>, RepositoryError> {
        let mut sessions = self.sessions.write().await;
        let stale: Vec<SessionId> = sessions
            .values()
            .filter(|s| s.updated_at <= cutoff)
            .map(|s| s.id)
            .collect();
        for id in &stale {
            sessions.remove(id);
        }
        Ok(stale)
    }
}
