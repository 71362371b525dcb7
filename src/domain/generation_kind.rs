use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationKind {
    #[serde(alias = "mcq")]
    Mcqs,
    #[serde(alias = "notes", alias = "short-notes")]
    ShortNotes,
}

impl GenerationKind {
    /// Used in artifact filenames.
    pub fn slug(&self) -> &'static str {
        match self {
            GenerationKind::Mcqs => "mcqs",
            GenerationKind::ShortNotes => "short_notes",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GenerationKind::Mcqs => "MCQs",
            GenerationKind::ShortNotes => "Short Notes",
        }
    }
}

impl FromStr for GenerationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mcq" | "mcqs" => Ok(GenerationKind::Mcqs),
            "notes" | "short_notes" | "short-notes" | "short notes" => {
                Ok(GenerationKind::ShortNotes)
            }
            other => Err(format!(
                "Invalid generation kind: {}. Expected: mcqs or short-notes",
                other
            )),
        }
    }
}

impl fmt::Display for GenerationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
