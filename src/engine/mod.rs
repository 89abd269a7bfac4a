//! The respond pipeline: normalize, match, classify, select.
//!
//! [`ChatEngine`] is the explicit context object holding everything the
//! pipeline needs: the corpus, the fitted vectorizer, the trained
//! classifier, and the response-selection RNG. All of it is built once by
//! [`ChatEngine::train`] and immutable afterwards, except the RNG, which
//! sits behind a mutex so the engine can serve concurrent callers.

use parking_lot::Mutex;
use rand::prelude::*;

use crate::classifier::{LogisticRegression, TrainingConfig};
use crate::corpus::Corpus;
use crate::error::Result;
use crate::features::CountVectorizer;
use crate::matching::{MatcherConfig, best_match};

/// Reply when no example phrase scores above the matcher cutoff.
pub const NO_MATCH_FALLBACK: &str = "I'm not sure I understand. Can you rephrase? 🤔";

/// Reply when the predicted label has no intent in the corpus.
///
/// Unreachable as long as training and corpus stay consistent, but the
/// pipeline degrades to this message instead of panicking.
pub const UNKNOWN_INTENT_FALLBACK: &str = "I'm not sure how to respond to that. 🤔";

/// Configuration for engine construction.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Lexical matcher settings.
    pub matcher: MatcherConfig,
    /// Classifier training settings.
    pub training: TrainingConfig,
    /// Seed for the response-selection RNG. `None` seeds from the OS.
    pub response_seed: Option<u64>,
}

/// The trained intent-matching engine.
pub struct ChatEngine {
    corpus: Corpus,
    vectorizer: CountVectorizer,
    model: LogisticRegression,
    matcher: MatcherConfig,
    /// The only mutable per-call state; guarded for concurrent callers.
    rng: Mutex<StdRng>,
}

impl std::fmt::Debug for ChatEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatEngine")
            .field("intents", &self.corpus.len())
            .field("phrases", &self.corpus.entries().len())
            .field("vocabulary_size", &self.vectorizer.vocabulary_size())
            .finish()
    }
}

impl ChatEngine {
    /// Train an engine on the given corpus with default configuration.
    pub fn train(corpus: Corpus) -> Result<ChatEngine> {
        Self::train_with_config(corpus, EngineConfig::default())
    }

    /// Train an engine with explicit configuration.
    ///
    /// Runs the one-time startup sequence: vectorizer fit over all example
    /// phrases, feature extraction, classifier fit. Any failure here is
    /// fatal; an engine that trained successfully never fails at respond
    /// time.
    pub fn train_with_config(corpus: Corpus, config: EngineConfig) -> Result<ChatEngine> {
        let documents: Vec<String> = corpus.phrases().map(str::to_string).collect();
        let labels: Vec<String> = corpus.entries().iter().map(|e| e.tag.clone()).collect();

        let vectorizer = CountVectorizer::fit(&documents)?;
        let vectors: Vec<Vec<f64>> = documents
            .iter()
            .map(|doc| vectorizer.transform(doc))
            .collect();
        let model = LogisticRegression::fit_auto(&vectors, &labels, &config.training)?;

        log::info!(
            "trained on {} intents, {} phrases, vocabulary of {} tokens",
            corpus.len(),
            documents.len(),
            vectorizer.vocabulary_size()
        );

        let rng = match config.response_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(ChatEngine {
            corpus,
            vectorizer,
            model,
            matcher: config.matcher,
            rng: Mutex::new(rng),
        })
    }

    /// Produce a reply for raw user input.
    ///
    /// Stateless across calls: normalize the input, fuzzy-match it against
    /// every known phrase, classify the matched phrase, and pick one of the
    /// predicted intent's responses at random. Inputs that match nothing
    /// above the cutoff get the fixed no-match fallback.
    pub fn respond(&self, raw_text: &str) -> String {
        let normalized = crate::analysis::normalize(raw_text);

        let Some(matched) = best_match(&normalized, self.corpus.phrases(), &self.matcher) else {
            log::debug!("no lexical match for {normalized:?}");
            return NO_MATCH_FALLBACK.to_string();
        };
        log::debug!(
            "matched {:?} with score {:.1}",
            matched.phrase,
            matched.score
        );

        let features = self.vectorizer.transform(&matched.phrase);
        let tag = self.model.predict(&features);

        match self.corpus.intent(tag) {
            Some(intent) => self.select_response(&intent.responses),
            None => {
                log::warn!("predicted label {tag:?} has no intent in the corpus");
                UNKNOWN_INTENT_FALLBACK.to_string()
            }
        }
    }

    /// Pick one response uniformly at random.
    fn select_response(&self, responses: &[String]) -> String {
        let mut rng = self.rng.lock();
        match responses.choose(&mut *rng) {
            Some(response) => response.clone(),
            // Responses are validated non-empty at corpus load
            None => UNKNOWN_INTENT_FALLBACK.to_string(),
        }
    }

    /// The corpus this engine was trained on.
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Labels the classifier can predict.
    pub fn labels(&self) -> &[String] {
        self.model.labels()
    }

    /// Size of the fitted vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }
}
