use quizzybee::application::ports::{RepositoryError, SessionRepository};
use quizzybee::domain::{Document, Session, SessionState};
use quizzybee::infrastructure::persistence::InMemorySessionRepository;

#[tokio::test]
async fn given_created_session_when_getting_then_returned() {
    let repo = InMemorySessionRepository::new();
    let session = Session::new();

    repo.create(&session).await.unwrap();

    let found = repo.get(session.id).await.unwrap().unwrap();
    assert_eq!(found.id, session.id);
    assert_eq!(found.state, SessionState::Idle);
}

#[tokio::test]
async fn given_duplicate_id_when_creating_then_storage_failed() {
    let repo = InMemorySessionRepository::new();
    let session = Session::new();
    repo.create(&session).await.unwrap();

    let err = repo.create(&session).await.unwrap_err();

    assert!(matches!(err, RepositoryError::StorageFailed(_)));
}

#[tokio::test]
async fn given_modified_session_when_saving_then_changes_visible() {
    let repo = InMemorySessionRepository::new();
    let mut session = Session::new();
    repo.create(&session).await.unwrap();

    session
        .begin_upload(Document::from_upload("a.txt", 1))
        .unwrap();
    repo.save(&session).await.unwrap();

    let found = repo.get(session.id).await.unwrap().unwrap();
    assert_eq!(found.state, SessionState::Uploaded);
}

#[tokio::test]
async fn given_unknown_session_when_saving_then_not_found() {
    let repo = InMemorySessionRepository::new();

    let err = repo.save(&Session::new()).await.unwrap_err();

    assert!(matches!(err, RepositoryError::NotFound(_)));
}

#[tokio::test]
async fn given_deleted_session_when_getting_then_none() {
    let repo = InMemorySessionRepository::new();
    let session = Session::new();
    repo.create(&session).await.unwrap();

    repo.delete(session.id).await.unwrap();

    assert!(repo.get(session.id).await.unwrap().is_none());
    assert_eq!(repo.len().await, 0);
}

#[tokio::test]
async fn given_stale_and_fresh_sessions_when_removing_idle_then_only_stale_removed() {
    let repo = InMemorySessionRepository::new();
    let mut stale = Session::new();
    stale.updated_at = chrono::Utc::now() - chrono::Duration::hours(2);
    let fresh = Session::new();
    repo.create(&stale).await.unwrap();
    repo.create(&fresh).await.unwrap();

    let removed = repo
        .remove_idle(chrono::Utc::now() - chrono::Duration::hours(1))
        .await
        .unwrap();

    assert_eq!(removed, vec![stale.id]);
    assert!(repo.get(stale.id).await.unwrap().is_none());
    assert!(repo.get(fresh.id).await.unwrap().is_some());
    assert_eq!(repo.len().await, 1);
}
