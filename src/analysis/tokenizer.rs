//! Whitespace tokenization for normalized text.

/// Split normalized text into whitespace-delimited tokens.
///
/// Callers are expected to pass text that already went through
/// [`normalize`](crate::analysis::normalize); no further filtering happens
/// here.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}
