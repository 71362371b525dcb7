use super::{Document, GenerationKind};

/// Deterministic result filenames for one document and kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNames {
    pub txt_filename: String,
    pub pdf_filename: String,
}

impl ArtifactNames {
    pub fn for_document(kind: GenerationKind, document: &Document) -> Self {
        let stem = format!("generated_{}_{}", kind.slug(), document.basename());
        Self {
            txt_filename: format!("{stem}.txt"),
            pdf_filename: format!("{stem}.pdf"),
        }
    }
}
