//! Best-match search over the corpus phrase list.

use serde::{Deserialize, Serialize};

use crate::matching::scorer::weighted_ratio;

/// Configuration for the fuzzy lexical matcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Minimum weighted-ratio score (0..100) required to accept a match.
    pub score_cutoff: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        MatcherConfig { score_cutoff: 80.0 }
    }
}

/// A candidate phrase together with its weighted-ratio score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMatch {
    /// The matched candidate phrase, verbatim.
    pub phrase: String,
    /// Weighted-ratio score on a 0..100 scale.
    pub score: f64,
}

/// Find the best fuzzy match for `query` among `candidates`.
///
/// Every candidate is scored; the maximum is global, so there is no early
/// exit. Ties break to the first candidate in iteration order. Returns
/// `None` when the best score is strictly below the configured cutoff, or
/// when there are no candidates at all.
pub fn best_match<'a, I>(query: &str, candidates: I, config: &MatcherConfig) -> Option<ScoredMatch>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<ScoredMatch> = None;

    for candidate in candidates {
        let score = weighted_ratio(query, candidate);
        let improved = match &best {
            Some(current) => score > current.score,
            None => true,
        };
        if improved {
            best = Some(ScoredMatch {
                phrase: candidate.to_string(),
                score,
            });
        }
    }

    best.filter(|m| m.score >= config.score_cutoff)
}
