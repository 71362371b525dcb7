use std::fmt;

const UPLOADS_PREFIX: &str = "uploads";
const RESULTS_PREFIX: &str = "results";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePath(String);

impl StoragePath {
    pub fn upload(filename: &str) -> Self {
        Self(format!("{}/{}", UPLOADS_PREFIX, sanitize_filename(filename)))
    }

    pub fn result(filename: &str) -> Self {
        Self(format!("{}/{}", RESULTS_PREFIX, sanitize_filename(filename)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Characters the object store would percent-encode inside a segment.
const RESERVED: &[char] = &[
    '{', '}', '^', '%', '`', '[', ']', '"', '<', '>', '~', '#', '|', '*', '?',
];

// Client-supplied names must stay a single path segment, stored under the
// same name the object store reports back.
fn sanitize_filename(filename: &str) -> String {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
        .trim();
    match name {
        "" | "." | ".." => "unnamed".to_string(),
        other => other
            .chars()
            .map(|c| {
                if c.is_control() || RESERVED.contains(&c) {
                    '_'
                } else {
                    c
                }
            })
            .collect(),
    }
}
