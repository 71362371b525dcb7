use serde::Serialize;

use crate::domain::{GenerationKind, GenerationResult, McqItem, Session, ShortNote};

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: String,
    pub state: &'static str,
    pub document: Option<DocumentView>,
    pub extracted_chars: Option<usize>,
    pub result: Option<ResultView>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize)]
pub struct DocumentView {
    pub filename: String,
    pub content_type: &'static str,
    pub size_bytes: u64,
}

#[derive(Debug, Serialize)]
pub struct ResultView {
    pub kind: &'static str,
    pub label: &'static str,
    pub count: u32,
    pub content: String,
    pub sections: Vec<SectionView>,
    pub downloads: DownloadLinks,
    pub pdf_available: bool,
    pub generated_at: String,
}

/// A `##` section with its best-effort parsed form, when one could be read.
#[derive(Debug, Serialize)]
pub struct SectionView {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mcq: Option<McqItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<ShortNote>,
}

#[derive(Debug, Serialize)]
pub struct DownloadLinks {
    pub txt: String,
    pub pdf: Option<String>,
    pub txt_filename: String,
    pub pdf_filename: String,
}

#[derive(Debug, Serialize)]
pub struct GenerationResponse {
    pub session: SessionView,
    pub cached: bool,
    pub warnings: Vec<String>,
}

impl SessionView {
    pub fn from_session(session: &Session) -> Self {
        let id = session.id.to_string();
        Self {
            state: session.state.as_str(),
            document: session.document.as_ref().map(|d| DocumentView {
                filename: d.filename.clone(),
                content_type: d.content_type.as_mime(),
                size_bytes: d.size_bytes,
            }),
            extracted_chars: session.extracted_text.as_ref().map(|t| t.chars().count()),
            result: session
                .result
                .as_ref()
                .map(|r| ResultView::from_result(&id, r)),
            created_at: session.created_at.to_rfc3339(),
            updated_at: session.updated_at.to_rfc3339(),
            session_id: id,
        }
    }
}

impl ResultView {
    fn from_result(session_id: &str, result: &GenerationResult) -> Self {
        let sections = result
            .content
            .sections()
            .into_iter()
            .map(|text| SectionView::parse(result.kind, text))
            .collect();

        let base = format!("/api/v1/sessions/{session_id}/download");
        Self {
            kind: result.kind.slug(),
            label: result.kind.label(),
            count: result.count.get(),
            content: result.content.as_str().to_string(),
            sections,
            downloads: DownloadLinks {
                txt: format!("{base}/txt"),
                pdf: result.pdf_available.then(|| format!("{base}/pdf")),
                txt_filename: result.artifacts.txt_filename.clone(),
                pdf_filename: result.artifacts.pdf_filename.clone(),
            },
            pdf_available: result.pdf_available,
            generated_at: result.generated_at.to_rfc3339(),
        }
    }
}

impl SectionView {
    fn parse(kind: GenerationKind, text: &str) -> Self {
        let (mcq, note) = match kind {
            GenerationKind::Mcqs => (McqItem::parse(text), None),
            GenerationKind::ShortNotes => (None, ShortNote::parse(text)),
        };
        Self {
            text: text.to_string(),
            mcq,
            note,
        }
    }
}
