//! Bag-of-words feature extraction over a fixed vocabulary.
//!
//! The vectorizer is fit once at startup over all normalized example
//! phrases and reused unchanged for every query. `transform` produces raw
//! token counts; there is deliberately no length normalization and no
//! inverse-document-frequency weighting, the classifier works on plain
//! counts.

use ahash::AHashMap;

use crate::analysis::tokenize;
use crate::error::{BanterError, Result};

/// Bag-of-words count vectorizer with a fixed vocabulary.
#[derive(Clone)]
pub struct CountVectorizer {
    /// Vocabulary: token -> stable feature index, in first-seen order.
    vocabulary: AHashMap<String, usize>,
}

impl std::fmt::Debug for CountVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .finish()
    }
}

impl CountVectorizer {
    /// Fit a vectorizer on the given normalized documents.
    ///
    /// Every distinct whitespace-delimited token is assigned a stable index
    /// in first-seen order. An empty vocabulary means no document contained
    /// a single token, which leaves nothing to classify on; that is a
    /// startup failure.
    pub fn fit(documents: &[String]) -> Result<CountVectorizer> {
        let mut vocabulary = AHashMap::new();

        for doc in documents {
            for token in tokenize(doc) {
                if !vocabulary.contains_key(token) {
                    let idx = vocabulary.len();
                    vocabulary.insert(token.to_string(), idx);
                }
            }
        }

        if vocabulary.is_empty() {
            return Err(BanterError::analysis(
                "vocabulary is empty after fitting on the corpus",
            ));
        }

        Ok(CountVectorizer { vocabulary })
    }

    /// Transform a normalized phrase into a vector of token counts.
    ///
    /// Tokens outside the vocabulary contribute no signal.
    pub fn transform(&self, phrase: &str) -> Vec<f64> {
        let mut counts = vec![0.0; self.vocabulary.len()];
        for token in tokenize(phrase) {
            if let Some(&idx) = self.vocabulary.get(token) {
                counts[idx] += 1.0;
            }
        }
        counts
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}
