use quizzybee::infrastructure::text_processing::sanitize_extracted_text;

#[test]
fn given_word_hyphenated_across_lines_when_sanitizing_then_rejoined() {
    assert_eq!(sanitize_extracted_text("photo-\nsynthesis"), "photosynthesis");
}

#[test]
fn given_ligature_when_sanitizing_then_folded() {
    assert_eq!(sanitize_extracted_text("ﬁrst"), "first");
}

#[test]
fn given_ragged_whitespace_when_sanitizing_then_collapsed() {
    assert_eq!(
        sanitize_extracted_text("  one   two\t\tthree  \n\n\n\nfour  "),
        "one two three\n\nfour"
    );
}

#[test]
fn given_control_characters_when_sanitizing_then_dropped() {
    assert_eq!(sanitize_extracted_text("a\u{0}b\u{7}c"), "abc");
}

#[test]
fn given_blank_input_when_sanitizing_then_empty() {
    assert_eq!(sanitize_extracted_text(" \n \n\t"), "");
}
