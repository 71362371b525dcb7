use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static HYPHEN_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<prefix>\w)-[ \t]*\r?\n[ \t]*(?P<suffix>\w)").unwrap());

/// Cleans one page of PDF text before it is embedded in a prompt.
///
/// NFKC folds ligatures and compatibility forms, words hyphenated across a
/// line break are rejoined, control characters are dropped, runs of
/// whitespace inside a line collapse to one space and runs of blank lines
/// collapse to a single paragraph break.
pub fn sanitize_extracted_text(raw: &str) -> String {
    let normalized: String = raw
        .nfkc()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\r' | '\t'))
        .collect();
    let joined = HYPHEN_NEWLINE.replace_all(&normalized, "$prefix$suffix");

    let mut out = String::with_capacity(joined.len());
    let mut pending_break: Option<&str> = None;

    for line in joined.lines().map(str::trim) {
        if line.is_empty() {
            if !out.is_empty() {
                pending_break = Some("\n\n");
            }
            continue;
        }
        if let Some(separator) = pending_break.take() {
            out.push_str(separator);
        }
        push_collapsed(line, &mut out);
        pending_break = Some("\n");
    }

    out
}

fn push_collapsed(line: &str, out: &mut String) {
    let mut in_space = false;
    for ch in line.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(ch);
            in_space = false;
        }
    }
}
