use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Session, SessionId};

use super::RepositoryError;

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &Session) -> Result<(), RepositoryError>;

    async fn get(&self, id: SessionId) -> Result<Option<Session>, RepositoryError>;

    async fn save(&self, session: &Session) -> Result<(), RepositoryError>;

    async fn delete(&self, id: SessionId) -> Result<(), RepositoryError>;

    /// Removes every session last updated at or before `cutoff`.
    async fn remove_idle(&self, cutoff: DateTime<Utc>) -> Result<Vec<SessionId>, RepositoryError>;
}
