use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use bytes::Bytes;

use quizzybee::application::ports::{
    ArtifactStore, ArtifactStoreError, FileLoader, LlmClientError,
};
use quizzybee::application::services::{
    DownloadFormat, GenerationService, PromptBuilder, ResultWriter, SessionController,
    SessionError,
};
use quizzybee::domain::{GenerationKind, ItemCount, McqItem, SessionId, SessionState, StoragePath};
use quizzybee::infrastructure::llm::MockLlmClient;
use quizzybee::infrastructure::persistence::InMemorySessionRepository;
use quizzybee::infrastructure::rendering::LopdfRenderer;
use quizzybee::infrastructure::storage::{InMemoryArtifactStore, LocalArtifactStore};
use quizzybee::infrastructure::text_processing::{CompositeFileLoader, MockFileLoader};

const THREE_PARAGRAPHS: &[u8] = include_bytes!("../fixtures/three_paragraphs.txt");

struct Harness {
    controller: Arc<SessionController>,
    llm: Arc<MockLlmClient>,
    store: Arc<dyn ArtifactStore>,
}

struct FailingPdfStore {
    inner: InMemoryArtifactStore,
    fail_pdf_puts: AtomicBool,
}

impl FailingPdfStore {
    fn new() -> Self {
        Self {
            inner: InMemoryArtifactStore::new(),
            fail_pdf_puts: AtomicBool::new(false),
        }
    }
}

#[async_trait::async_trait]
impl ArtifactStore for FailingPdfStore {
    async fn put(&self, path: &StoragePath, data: Bytes) -> Result<u64, ArtifactStoreError> {
        if path.as_str().ends_with(".pdf") && self.fail_pdf_puts.load(Ordering::SeqCst) {
            return Err(ArtifactStoreError::WriteFailed("disk full".to_string()));
        }
        self.inner.put(path, data).await
    }

    async fn fetch(&self, path: &StoragePath) -> Result<Vec<u8>, ArtifactStoreError> {
        self.inner.fetch(path).await
    }

    async fn delete(&self, path: &StoragePath) -> Result<(), ArtifactStoreError> {
        self.inner.delete(path).await
    }

    fn local_path(&self, path: &StoragePath) -> Option<std::path::PathBuf> {
        self.inner.local_path(path)
    }
}

fn harness_with(llm: MockLlmClient, store: Arc<dyn ArtifactStore>) -> Harness {
    harness_with_loader(
        llm,
        store,
        Arc::new(CompositeFileLoader::with_default_adapters()),
    )
}

fn harness_with_loader(
    llm: MockLlmClient,
    store: Arc<dyn ArtifactStore>,
    file_loader: Arc<dyn FileLoader>,
) -> Harness {
    let llm = Arc::new(llm);
    let generation = GenerationService::new(
        llm.clone(),
        PromptBuilder::new(100_000),
        Duration::from_secs(5),
    );
    let writer = ResultWriter::new(store.clone(), Arc::new(LopdfRenderer::new()));
    let controller = SessionController::new(
        Arc::new(InMemorySessionRepository::new()),
        file_loader,
        store.clone(),
        generation,
        writer,
    );
    Harness {
        controller: Arc::new(controller),
        llm,
        store,
    }
}

fn harness(llm: MockLlmClient) -> Harness {
    harness_with(llm, Arc::new(InMemoryArtifactStore::new()))
}

async fn uploaded(h: &Harness) -> SessionId {
    let id = h.controller.create_session().await.unwrap();
    h.controller
        .upload(id, "three_paragraphs.txt", Bytes::from_static(THREE_PARAGRAPHS))
        .await
        .unwrap();
    id
}

fn mcq(tag: &str) -> String {
    format!("## MCQ\nQuestion: {tag}?\nA) a\nB) b\nC) c\nD) d\nCorrect Answer: A")
}

#[tokio::test]
async fn given_text_upload_when_generating_mcqs_then_prompt_holds_file_text_and_items_parse() {
    let h = harness(MockLlmClient::new());
    let id = uploaded(&h).await;

    let outcome = h
        .controller
        .generate(id, GenerationKind::Mcqs, ItemCount::clamped(5))
        .await
        .unwrap();

    let text = std::str::from_utf8(THREE_PARAGRAPHS).unwrap();
    let prompts = h.llm.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains(&format!("'{text}'")));
    assert!(prompts[0].contains("Please generate 5 MCQs"));

    let session = outcome.session;
    assert_eq!(session.state, SessionState::Ready);
    assert_eq!(session.extracted_text.as_deref(), Some(text));
    let result = session.result.unwrap();
    let sections = result.content.sections();
    assert_eq!(sections.len(), 5);
    for section in sections {
        let item = McqItem::parse(section).expect("every section parses");
        assert!(!item.question.is_empty());
        assert!(!item.correct_answer.is_empty());
    }
    assert!(outcome.warnings.is_empty());
    assert!(!outcome.cached);
}

#[tokio::test]
async fn given_upload_when_extracted_then_original_bytes_persisted_under_uploads() {
    let h = harness(MockLlmClient::new());
    uploaded(&h).await;

    let stored = h
        .store
        .fetch(&StoragePath::upload("three_paragraphs.txt"))
        .await
        .unwrap();

    assert_eq!(stored, THREE_PARAGRAPHS);
}

#[tokio::test]
async fn given_ready_session_when_regenerating_then_same_files_with_new_content() {
    let h = harness(MockLlmClient::scripted(vec![Ok(mcq("first")), Ok(mcq("second"))]));
    let id = uploaded(&h).await;

    let first = h
        .controller
        .generate(id, GenerationKind::Mcqs, ItemCount::clamped(1))
        .await
        .unwrap();
    let first_result = first.session.result.unwrap();
    let first_pdf = h
        .store
        .fetch(&StoragePath::result(&first_result.artifacts.pdf_filename))
        .await
        .unwrap();

    let second = h.controller.regenerate(id).await.unwrap();
    let second_result = second.session.result.unwrap();

    assert_eq!(second_result.artifacts, first_result.artifacts);
    assert_eq!(
        second_result.artifacts.txt_filename,
        "generated_mcqs_three_paragraphs.txt"
    );
    assert_ne!(second_result.content, first_result.content);
    assert!(second_result.content.as_str().contains("second?"));

    let txt = h
        .store
        .fetch(&StoragePath::result(&second_result.artifacts.txt_filename))
        .await
        .unwrap();
    assert_eq!(txt, second_result.content.as_str().as_bytes());
    let pdf = h
        .store
        .fetch(&StoragePath::result(&second_result.artifacts.pdf_filename))
        .await
        .unwrap();
    assert_ne!(pdf, first_pdf);

    let prompts = h.llm.prompts();
    assert_eq!(prompts.len(), 2);
    assert_eq!(prompts[0], prompts[1]);
}

#[tokio::test]
async fn given_unsupported_extension_when_uploading_then_halts_before_generation() {
    let h = harness(MockLlmClient::new());
    let id = h.controller.create_session().await.unwrap();

    let err = h
        .controller
        .upload(id, "slides.pptx", Bytes::from_static(b"not really slides"))
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::UnsupportedFormat(ref name) if name == "slides.pptx"));
    let session = h.controller.get(id).await.unwrap();
    assert_eq!(session.state, SessionState::Idle);
    assert!(session.document.is_none());

    let err = h
        .controller
        .generate(id, GenerationKind::Mcqs, ItemCount::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::InvalidState(_)));
    assert!(h.llm.prompts().is_empty());
}

#[tokio::test]
async fn given_unaccepted_extension_when_uploading_then_nothing_stored_or_extracted() {
    let loader = Arc::new(MockFileLoader::new());
    let h = harness_with_loader(
        MockLlmClient::new(),
        Arc::new(InMemoryArtifactStore::new()),
        loader.clone(),
    );
    let id = h.controller.create_session().await.unwrap();

    let err = h
        .controller
        .upload(id, "archive.ZIP", Bytes::from_static(b"PK"))
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::UnsupportedFormat(_)));
    assert_eq!(loader.calls(), 0);
    assert!(h.store.fetch(&StoragePath::upload("archive.ZIP")).await.is_err());
    assert_eq!(h.controller.get(id).await.unwrap().state, SessionState::Idle);
}

#[tokio::test]
async fn given_extraction_in_flight_when_uploading_another_file_then_busy_and_first_text_kept() {
    let h = harness_with_loader(
        MockLlmClient::new(),
        Arc::new(InMemoryArtifactStore::new()),
        Arc::new(MockFileLoader::with_delay(Duration::from_millis(200))),
    );
    let id = h.controller.create_session().await.unwrap();

    let controller = h.controller.clone();
    let first = tokio::spawn(async move {
        controller
            .upload(id, "a.txt", Bytes::from_static(b"TEXT OF A"))
            .await
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    let err = h
        .controller
        .upload(id, "b.txt", Bytes::from_static(b"TEXT OF B"))
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::SessionBusy));
    first.await.unwrap().unwrap();
    let session = h.controller.get(id).await.unwrap();
    assert_eq!(session.state, SessionState::Extracted);
    assert_eq!(session.document.unwrap().filename, "a.txt");
    assert_eq!(session.extracted_text.as_deref(), Some("TEXT OF A"));
}

#[tokio::test]
async fn given_blank_text_file_when_uploading_then_extraction_failure_and_idle() {
    let h = harness(MockLlmClient::new());
    let id = h.controller.create_session().await.unwrap();

    let err = h
        .controller
        .upload(id, "blank.txt", Bytes::from_static(b"   \n\n  "))
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::ExtractionFailure(_)));
    assert_eq!(err.kind(), "extraction_failure");
    assert_eq!(
        h.controller.get(id).await.unwrap().state,
        SessionState::Idle
    );
}

#[tokio::test]
async fn given_same_kind_and_count_when_generating_again_then_stored_result_returned() {
    let h = harness(MockLlmClient::new());
    let id = uploaded(&h).await;

    h.controller
        .generate(id, GenerationKind::ShortNotes, ItemCount::clamped(3))
        .await
        .unwrap();
    let again = h
        .controller
        .generate(id, GenerationKind::ShortNotes, ItemCount::clamped(3))
        .await
        .unwrap();

    assert!(again.cached);
    assert_eq!(h.llm.prompts().len(), 1);
}

#[tokio::test]
async fn given_different_count_when_generating_again_then_new_generation_runs() {
    let h = harness(MockLlmClient::new());
    let id = uploaded(&h).await;

    h.controller
        .generate(id, GenerationKind::ShortNotes, ItemCount::clamped(3))
        .await
        .unwrap();
    let next = h
        .controller
        .generate(id, GenerationKind::ShortNotes, ItemCount::clamped(4))
        .await
        .unwrap();

    assert!(!next.cached);
    assert_eq!(next.session.result.unwrap().content.sections().len(), 4);
    assert_eq!(h.llm.prompts().len(), 2);
}

#[tokio::test]
async fn given_failing_service_when_regenerating_then_previous_result_kept() {
    let h = harness(MockLlmClient::scripted(vec![
        Ok(mcq("kept")),
        Err(LlmClientError::ServerError("503".to_string())),
    ]));
    let id = uploaded(&h).await;
    h.controller
        .generate(id, GenerationKind::Mcqs, ItemCount::clamped(1))
        .await
        .unwrap();

    let err = h.controller.regenerate(id).await.unwrap_err();

    assert!(matches!(err, SessionError::ServiceError(LlmClientError::ServerError(_))));
    assert!(err.is_retryable());
    let session = h.controller.get(id).await.unwrap();
    assert_eq!(session.state, SessionState::Ready);
    assert!(session.result.unwrap().content.as_str().contains("kept?"));
}

#[tokio::test]
async fn given_pdf_write_failure_when_regenerating_then_artifacts_match_previous_result() {
    let store = Arc::new(FailingPdfStore::new());
    let h = harness_with(
        MockLlmClient::scripted(vec![Ok(mcq("OLD")), Ok(mcq("NEW"))]),
        store.clone(),
    );
    let id = uploaded(&h).await;
    h.controller
        .generate(id, GenerationKind::Mcqs, ItemCount::clamped(1))
        .await
        .unwrap();
    let old_pdf = h.controller.download(id, DownloadFormat::Pdf).await.unwrap();
    store.fail_pdf_puts.store(true, Ordering::SeqCst);

    let err = h.controller.regenerate(id).await.unwrap_err();

    assert!(matches!(err, SessionError::Storage(_)));
    let session = h.controller.get(id).await.unwrap();
    assert_eq!(session.state, SessionState::Ready);
    let result = session.result.unwrap();
    assert!(result.content.as_str().contains("OLD?"));

    let txt = h.controller.download(id, DownloadFormat::Txt).await.unwrap();
    assert_eq!(txt.data, result.content.as_str().as_bytes());
    let pdf = h.controller.download(id, DownloadFormat::Pdf).await.unwrap();
    assert_eq!(pdf.data, old_pdf.data);
}

#[tokio::test]
async fn given_failing_first_generation_when_generating_then_back_to_extracted() {
    let h = harness(MockLlmClient::scripted(vec![Err(LlmClientError::Unauthorized(
        "bad key".to_string(),
    ))]));
    let id = uploaded(&h).await;

    let err = h
        .controller
        .generate(id, GenerationKind::Mcqs, ItemCount::clamped(2))
        .await
        .unwrap_err();

    assert!(!err.is_retryable());
    assert_eq!(
        h.controller.get(id).await.unwrap().state,
        SessionState::Extracted
    );
}

#[tokio::test]
async fn given_unrenderable_output_when_generating_then_text_kept_and_pdf_unavailable() {
    let h = harness(MockLlmClient::scripted(vec![Ok(
        "## Note 1\nArrows → are not in the PDF font".to_string(),
    )]));
    let id = uploaded(&h).await;

    let outcome = h
        .controller
        .generate(id, GenerationKind::ShortNotes, ItemCount::clamped(1))
        .await
        .unwrap();

    assert_eq!(outcome.warnings.len(), 1);
    assert!(outcome.warnings[0].starts_with("PDF download unavailable"));
    let result = outcome.session.result.unwrap();
    assert!(!result.pdf_available);

    let txt = h.controller.download(id, DownloadFormat::Txt).await.unwrap();
    assert_eq!(txt.filename, "generated_short_notes_three_paragraphs.txt");
    assert_eq!(txt.data, result.content.as_str().as_bytes());

    let err = h
        .controller
        .download(id, DownloadFormat::Pdf)
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::ArtifactUnavailable(_)));
}

#[tokio::test]
async fn given_ready_session_when_downloading_pdf_then_pdf_bytes_returned() {
    let h = harness(MockLlmClient::new());
    let id = uploaded(&h).await;
    h.controller
        .generate(id, GenerationKind::Mcqs, ItemCount::clamped(2))
        .await
        .unwrap();

    let pdf = h.controller.download(id, DownloadFormat::Pdf).await.unwrap();

    assert_eq!(pdf.filename, "generated_mcqs_three_paragraphs.pdf");
    assert_eq!(pdf.content_type, "application/pdf");
    assert!(pdf.data.starts_with(b"%PDF"));
}

#[tokio::test]
async fn given_no_result_when_downloading_or_regenerating_then_no_result_error() {
    let h = harness(MockLlmClient::new());
    let id = uploaded(&h).await;

    let download = h.controller.download(id, DownloadFormat::Txt).await.unwrap_err();
    let regenerate = h.controller.regenerate(id).await.unwrap_err();

    assert!(matches!(download, SessionError::NoResult));
    assert!(matches!(regenerate, SessionError::NoResult));
}

#[tokio::test]
async fn given_unknown_session_when_getting_then_not_found() {
    let h = harness(MockLlmClient::new());

    let err = h.controller.get(SessionId::new()).await.unwrap_err();

    assert!(matches!(err, SessionError::SessionNotFound(_)));
}

#[tokio::test]
async fn given_generation_in_flight_when_generating_again_then_session_busy() {
    let h = harness(MockLlmClient::with_delay(Duration::from_millis(300)));
    let id = uploaded(&h).await;

    let controller = h.controller.clone();
    let first = tokio::spawn(async move {
        controller
            .generate(id, GenerationKind::Mcqs, ItemCount::clamped(1))
            .await
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    let err = h
        .controller
        .generate(id, GenerationKind::Mcqs, ItemCount::clamped(2))
        .await
        .unwrap_err();
    let upload_err = h
        .controller
        .upload(id, "other.txt", Bytes::from_static(b"other"))
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::SessionBusy));
    assert!(matches!(upload_err, SessionError::SessionBusy));
    assert!(first.await.unwrap().is_ok());
}

#[tokio::test]
async fn given_local_store_when_generating_then_artifacts_written_under_root() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = Arc::new(LocalArtifactStore::new(dir.path().to_path_buf()).unwrap());
    let h = harness_with(MockLlmClient::new(), store);
    let id = uploaded(&h).await;

    let outcome = h
        .controller
        .generate(id, GenerationKind::Mcqs, ItemCount::clamped(2))
        .await
        .unwrap();
    let result = outcome.session.result.unwrap();

    assert!(dir.path().join("uploads/three_paragraphs.txt").is_file());
    let txt = dir.path().join("results").join(&result.artifacts.txt_filename);
    assert_eq!(std::fs::read_to_string(&txt).unwrap(), result.content.as_str());
    assert!(dir.path().join("results").join(&result.artifacts.pdf_filename).is_file());
    assert_eq!(
        h.controller
            .artifact_path(&result.artifacts.txt_filename)
            .unwrap()
            .canonicalize()
            .unwrap(),
        txt.canonicalize().unwrap()
    );
}
