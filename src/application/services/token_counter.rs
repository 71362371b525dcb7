use std::sync::LazyLock;
use tiktoken_rs::CoreBPE;

static TOKENIZER: LazyLock<CoreBPE> = LazyLock::new(|| {
    tiktoken_rs::cl100k_base().expect("Failed to initialize cl100k_base tokenizer")
});

pub fn count_tokens(text: &str) -> usize {
    TOKENIZER.encode_with_special_tokens(text).len()
}

/// Longest prefix of `text`, cut on a char boundary, that fits in `max_tokens`.
pub fn truncate_to_tokens(text: &str, max_tokens: usize) -> &str {
    let total = count_tokens(text);
    if total <= max_tokens {
        return text;
    }
    if max_tokens == 0 {
        return "";
    }

    let mut end = floor_char_boundary(text, text.len() * max_tokens / total);
    while end > 0 && count_tokens(&text[..end]) > max_tokens {
        end = floor_char_boundary(text, end - end.div_ceil(10));
    }
    &text[..end]
}

fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut i = index.min(text.len());
    while !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}
