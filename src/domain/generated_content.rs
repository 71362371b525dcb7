use serde::Serialize;

/// Literal marker separating independent items in a generation result.
pub const SECTION_DELIMITER: &str = "##";

/// Raw text returned by the generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedContent(String);

impl GeneratedContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Sections in order, trimmed, with blank segments discarded.
    pub fn sections(&self) -> Vec<&str> {
        split_sections(&self.0)
    }
}

pub fn split_sections(text: &str) -> Vec<&str> {
    text.split(SECTION_DELIMITER)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct McqItem {
    pub question: String,
    pub options: [String; 4],
    pub correct_answer: String,
}

impl McqItem {
    /// Best-effort parse of one section. `None` when any field is missing.
    pub fn parse(section: &str) -> Option<Self> {
        let mut question = None;
        let mut options: [Option<String>; 4] = Default::default();
        let mut correct_answer = None;

        for raw in section.lines() {
            let line = strip_emphasis(raw);
            if let Some(rest) = strip_label(&line, "Question:") {
                question = Some(rest.to_string());
            } else if let Some(rest) = strip_label(&line, "Correct Answer:") {
                correct_answer = Some(rest.to_string());
            } else {
                for (slot, label) in options.iter_mut().zip(["A)", "B)", "C)", "D)"]) {
                    if let Some(rest) = strip_label(&line, label) {
                        *slot = Some(rest.to_string());
                    }
                }
            }
        }

        let [a, b, c, d] = options;
        Some(Self {
            question: question?,
            options: [a?, b?, c?, d?],
            correct_answer: correct_answer?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortNote {
    pub index: Option<u32>,
    pub text: String,
}

impl ShortNote {
    /// A leading `Note <n>` header line is taken as the index.
    pub fn parse(section: &str) -> Option<Self> {
        let section = section.trim();
        if section.is_empty() {
            return None;
        }

        let (first, rest) = section.split_once('\n').unwrap_or((section, ""));
        let header = strip_emphasis(first);
        let index = header
            .strip_prefix("Note")
            .map(|s| s.trim().trim_end_matches(':'))
            .and_then(|s| s.parse::<u32>().ok());

        let text = match index {
            Some(_) => rest.trim().to_string(),
            None => section.to_string(),
        };

        Some(Self { index, text })
    }
}

fn strip_emphasis(line: &str) -> String {
    line.trim().replace("**", "")
}

fn strip_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    line.strip_prefix(label).map(str::trim)
}
