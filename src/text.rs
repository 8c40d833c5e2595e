//! Grapheme-aware text helpers.

use unicode_segmentation::UnicodeSegmentation;

/// Returns at most `max` grapheme clusters from the start of `text`.
#[must_use]
pub fn take_graphemes(text: &str, max: usize) -> &str {
    match text.grapheme_indices(true).nth(max) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Short preview used in history listings: the first `max` graphemes followed
/// by `...`. The ellipsis is always appended.
#[must_use]
pub fn preview(text: &str, max: usize) -> String {
    format!("{}...", take_graphemes(text, max))
}
