//! Text normalization into a canonical comparable form.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Everything that is not an ASCII letter, digit, or whitespace.
    static ref NON_ALPHANUMERIC: Regex = Regex::new(r"[^a-z0-9\s]").expect("valid regex");
}

/// Normalize raw text into a canonical comparable form.
///
/// Lowercases, removes every character that is not an ASCII letter, digit,
/// or whitespace, and trims leading and trailing whitespace. Stripping
/// happens before the trim, so the function is idempotent:
/// `normalize(normalize(s)) == normalize(s)` for every input.
///
/// # Examples
///
/// ```
/// use banter::analysis::normalize;
///
/// assert_eq!(normalize("  Hello, World!  "), "hello world");
/// assert_eq!(normalize("What's up?"), "whats up");
/// ```
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    NON_ALPHANUMERIC.replace_all(&lowered, "").trim().to_string()
}
