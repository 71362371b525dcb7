mod artifact_names;
mod document;
mod document_id;
mod generated_content;
mod generation_kind;
mod generation_request;
mod item_count;
mod session;
mod session_id;
mod session_state;
mod storage_path;

pub use artifact_names::ArtifactNames;
pub use document::{ACCEPTED_EXTENSIONS, ContentType, Document};
pub use document_id::DocumentId;
pub use generated_content::{
    GeneratedContent, McqItem, SECTION_DELIMITER, ShortNote, split_sections,
};
pub use generation_kind::GenerationKind;
pub use generation_request::GenerationRequest;
pub use item_count::ItemCount;
pub use session::{GenerationResult, Session, SessionTransitionError};
pub use session_id::SessionId;
pub use session_state::SessionState;
pub use storage_path::StoragePath;
