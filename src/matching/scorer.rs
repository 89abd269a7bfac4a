//! Fuzzy similarity ratios on a 0..100 scale.
//!
//! All scorers expect text that already went through
//! [`normalize`](crate::analysis::normalize); they do no case folding or
//! punctuation handling of their own. [`weighted_ratio`] is the scorer the
//! matcher uses: it combines the plain, partial, and token-based ratios
//! with length-dependent weights so that reordered tokens, partial
//! overlaps, and small typos all score high while unrelated text stays low.

use std::collections::BTreeSet;

use crate::matching::distance::indel_distance;

/// Scale applied to token-based ratios when combined in [`weighted_ratio`].
const UNBASE_SCALE: f64 = 0.95;

/// Plain similarity ratio between two strings.
///
/// Defined as `(1 - indel_distance / (len1 + len2)) * 100`. Two empty
/// strings are identical and score 100.
pub fn ratio(s1: &str, s2: &str) -> f64 {
    let total = s1.chars().count() + s2.chars().count();
    if total == 0 {
        return 100.0;
    }
    let distance = indel_distance(s1, s2);
    (1.0 - distance as f64 / total as f64) * 100.0
}

/// Best ratio of the shorter string against any equally long window of the
/// longer string.
///
/// Captures the case where one string is contained in the other, e.g. a
/// short query against a long stored phrase.
pub fn partial_ratio(s1: &str, s2: &str) -> f64 {
    let chars1: Vec<char> = s1.chars().collect();
    let chars2: Vec<char> = s2.chars().collect();
    let (shorter, longer) = if chars1.len() <= chars2.len() {
        (&chars1, &chars2)
    } else {
        (&chars2, &chars1)
    };

    if shorter.is_empty() {
        return if longer.is_empty() { 100.0 } else { 0.0 };
    }

    let short_str: String = shorter.iter().collect();
    let mut best = 0.0_f64;
    for start in 0..=(longer.len() - shorter.len()) {
        let window: String = longer[start..start + shorter.len()].iter().collect();
        let score = ratio(&short_str, &window);
        if score > best {
            best = score;
        }
        if best >= 100.0 {
            break;
        }
    }
    best
}

/// Ratio of the two strings with their tokens sorted.
///
/// Insensitive to word order: `"hi there"` and `"there hi"` score 100.
pub fn token_sort_ratio(s1: &str, s2: &str) -> f64 {
    ratio(&sorted_tokens(s1), &sorted_tokens(s2))
}

/// Partial ratio of the two strings with their tokens sorted.
pub fn partial_token_sort_ratio(s1: &str, s2: &str) -> f64 {
    partial_ratio(&sorted_tokens(s1), &sorted_tokens(s2))
}

/// Token set ratio, tolerant of extra tokens on either side.
///
/// Compares the shared token set against each side's full token set, so a
/// query that is a subset of a stored phrase still scores high.
pub fn token_set_ratio(s1: &str, s2: &str) -> f64 {
    let (sect, combined1, combined2) = token_set_strings(s1, s2);
    ratio(&sect, &combined1)
        .max(ratio(&sect, &combined2))
        .max(ratio(&combined1, &combined2))
}

/// Partial variant of [`token_set_ratio`].
pub fn partial_token_set_ratio(s1: &str, s2: &str) -> f64 {
    let (sect, combined1, combined2) = token_set_strings(s1, s2);
    partial_ratio(&sect, &combined1)
        .max(partial_ratio(&sect, &combined2))
        .max(partial_ratio(&combined1, &combined2))
}

/// Weighted combination of all ratios, on a 0..100 scale.
///
/// Follows the classic weighted-ratio heuristics: token-based scores are
/// damped by 0.95; when the strings differ in length by more than a factor
/// of 1.5 the partial scorers take over, damped by 0.9 (or 0.6 once the
/// length ratio exceeds 8).
pub fn weighted_ratio(s1: &str, s2: &str) -> f64 {
    let len1 = s1.chars().count();
    let len2 = s2.chars().count();
    if len1 == 0 || len2 == 0 {
        return 0.0;
    }

    let base = ratio(s1, s2);
    let len_ratio = len1.max(len2) as f64 / len1.min(len2) as f64;

    if len_ratio < 1.5 {
        base.max(token_sort_ratio(s1, s2) * UNBASE_SCALE)
            .max(token_set_ratio(s1, s2) * UNBASE_SCALE)
    } else {
        let partial_scale = if len_ratio < 8.0 { 0.9 } else { 0.6 };
        base.max(partial_ratio(s1, s2) * partial_scale)
            .max(partial_token_sort_ratio(s1, s2) * UNBASE_SCALE * partial_scale)
            .max(partial_token_set_ratio(s1, s2) * UNBASE_SCALE * partial_scale)
    }
}

/// Tokens of the input sorted and re-joined with single spaces.
fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Build the intersection and combined strings used by the token set ratios.
fn token_set_strings(s1: &str, s2: &str) -> (String, String, String) {
    let tokens1: BTreeSet<&str> = s1.split_whitespace().collect();
    let tokens2: BTreeSet<&str> = s2.split_whitespace().collect();

    let sect: Vec<&str> = tokens1.intersection(&tokens2).copied().collect();
    let diff1: Vec<&str> = tokens1.difference(&tokens2).copied().collect();
    let diff2: Vec<&str> = tokens2.difference(&tokens1).copied().collect();

    let sect_str = sect.join(" ");
    let combined1 = join_nonempty(&sect_str, &diff1.join(" "));
    let combined2 = join_nonempty(&sect_str, &diff2.join(" "));
    (sect_str, combined1, combined2)
}

fn join_nonempty(left: &str, right: &str) -> String {
    match (left.is_empty(), right.is_empty()) {
        (true, _) => right.to_string(),
        (_, true) => left.to_string(),
        _ => format!("{left} {right}"),
    }
}
