//! Word tokenization and width helpers for status-bar text.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Suffix appended to every shortened lyric.
pub const ELLIPSIS: &str = "…";

/// Calculate display width in terminal columns.
#[inline]
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

fn is_word_segment(segment: &str) -> bool {
    segment.chars().any(char::is_alphanumeric)
}

/// Split text into truncation units along Unicode word boundaries.
///
/// Each token is one word plus the whitespace or punctuation that follows it,
/// so concatenating every token reproduces the input exactly. Anything before
/// the first word rides along with the first token. Ideographic scripts yield
/// one token per character, as UAX #29 has no spaces to split on.
pub fn word_tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0usize;
    let mut has_word = false;
    for (idx, segment) in text.split_word_bound_indices() {
        if is_word_segment(segment) {
            if has_word {
                tokens.push(&text[start..idx]);
                start = idx;
            }
            has_word = true;
        }
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}

/// Join the first `keep` tokens and mark the cut with [`ELLIPSIS`].
///
/// Returns an empty string when nothing is kept.
pub fn shortened(tokens: &[&str], keep: usize) -> String {
    if keep == 0 {
        return String::new();
    }
    let kept = tokens[..keep.min(tokens.len())].concat();
    let mut result = String::with_capacity(kept.len() + ELLIPSIS.len());
    result.push_str(kept.trim_end());
    result.push_str(ELLIPSIS);
    result
}
