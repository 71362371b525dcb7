use super::{GenerationKind, ItemCount};

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub text: String,
    pub kind: GenerationKind,
    pub count: ItemCount,
}

impl GenerationRequest {
    pub fn new(text: String, kind: GenerationKind, count: ItemCount) -> Self {
        Self { text, kind, count }
    }
}
