use crate::domain::{GenerationKind, ItemCount};

use super::token_counter::{count_tokens, truncate_to_tokens};

pub fn build_mcq_prompt(text: &str, n: ItemCount) -> String {
    format!(
        r#"
    You are an AI assistant helping the user generate multiple-choice questions (MCQs) based on the following text:
    '{text}'
    Please generate {n} MCQs from the text. Each question should have:
    - A clear question
    - Four answer options (labeled A, B, C, D)
    - The correct answer clearly indicated
    Format:
    ## MCQ
    Question: [question]
    A) [option A]
    B) [option B]
    C) [option C]
    D) [option D]
    Correct Answer: [correct option]
    "#,
        n = n.get()
    )
}

pub fn build_notes_prompt(text: &str, n: ItemCount) -> String {
    format!(
        r#"
    You are an AI assistant helping the user generate concise and meaningful short notes based on the following text:
    '{text}'
    Please generate {n} short notes. Each note should be concise, clear, and summarize key points from the text.
    Format:
    ## Note [index]
    [Short Note]
    "#,
        n = n.get()
    )
}

/// Chooses the template for a kind and keeps the embedded document within a token budget.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    max_input_tokens: usize,
}

impl PromptBuilder {
    pub fn new(max_input_tokens: usize) -> Self {
        Self { max_input_tokens }
    }

    pub fn build(&self, kind: GenerationKind, text: &str, n: ItemCount) -> String {
        let text = self.fit_input(text);
        match kind {
            GenerationKind::Mcqs => build_mcq_prompt(text, n),
            GenerationKind::ShortNotes => build_notes_prompt(text, n),
        }
    }

    fn fit_input<'a>(&self, text: &'a str) -> &'a str {
        let truncated = truncate_to_tokens(text, self.max_input_tokens);
        if truncated.len() < text.len() {
            tracing::warn!(
                original_tokens = count_tokens(text),
                max_input_tokens = self.max_input_tokens,
                kept_chars = truncated.chars().count(),
                "Document text exceeds input budget, truncating"
            );
        }
        truncated
    }
}
