//! Intent corpus: definitions, validation, and derived lookup indexes.
//!
//! The corpus is loaded once at startup from a JSON definition file and is
//! immutable for the rest of the process. Loading validates every record;
//! a malformed record fails loading instead of being skipped, so a process
//! never serves requests against a partial corpus.
//!
//! Two indexes are derived at load time: a flat ordered list of
//! `(normalized phrase, owning tag)` pairs that the lexical matcher scans,
//! and a reverse map from tag to intent that the response selector uses.

use std::fs;
use std::path::Path;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::analysis::normalize;
use crate::error::{BanterError, Result};

/// A single intent record as it appears in a corpus definition file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentDefinition {
    /// Unique intent label.
    pub tag: String,
    /// Example phrases expressing the intent.
    pub patterns: Vec<String>,
    /// Candidate responses for the intent.
    pub responses: Vec<String>,
}

/// A validated intent with normalized example phrases.
#[derive(Debug, Clone)]
pub struct Intent {
    /// Unique intent label.
    pub tag: String,
    /// Normalized example phrases, in definition order.
    pub examples: Vec<String>,
    /// Candidate responses, in definition order. Never empty.
    pub responses: Vec<String>,
}

/// One normalized example phrase and its owning intent label.
#[derive(Debug, Clone)]
pub struct PhraseEntry {
    /// The normalized example phrase.
    pub phrase: String,
    /// Label of the intent that owns the phrase.
    pub tag: String,
}

/// The immutable intent corpus with derived lookup indexes.
#[derive(Debug, Clone)]
pub struct Corpus {
    intents: Vec<Intent>,
    phrase_index: Vec<PhraseEntry>,
    tag_index: AHashMap<String, usize>,
}

impl Corpus {
    /// Load a corpus from a JSON definition file.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Corpus> {
        let content = fs::read_to_string(path)?;
        Corpus::from_json(&content)
    }

    /// Parse a corpus from a JSON string.
    pub fn from_json(json: &str) -> Result<Corpus> {
        let definitions: Vec<IntentDefinition> = serde_json::from_str(json)?;
        Corpus::from_definitions(definitions)
    }

    /// Build and validate a corpus from intent definitions.
    ///
    /// Fails on: an empty definition list, a blank or duplicate tag, empty
    /// pattern or response lists, a pattern that normalizes to the empty
    /// string, a blank response, or the same normalized phrase appearing
    /// under two different intents.
    pub fn from_definitions(definitions: Vec<IntentDefinition>) -> Result<Corpus> {
        if definitions.is_empty() {
            return Err(BanterError::corpus("corpus has no intents"));
        }

        let mut intents = Vec::with_capacity(definitions.len());
        let mut phrase_index = Vec::new();
        let mut tag_index = AHashMap::with_capacity(definitions.len());
        let mut phrase_owners: AHashMap<String, String> = AHashMap::new();

        for definition in definitions {
            let tag = definition.tag.trim().to_string();
            if tag.is_empty() {
                return Err(BanterError::corpus("intent has an empty tag"));
            }
            if tag_index.contains_key(&tag) {
                return Err(BanterError::corpus(format!("duplicate intent tag: {tag}")));
            }
            if definition.patterns.is_empty() {
                return Err(BanterError::corpus(format!(
                    "intent {tag} has no example patterns"
                )));
            }
            if definition.responses.is_empty() {
                return Err(BanterError::corpus(format!("intent {tag} has no responses")));
            }
            if definition.responses.iter().any(|r| r.trim().is_empty()) {
                return Err(BanterError::corpus(format!(
                    "intent {tag} has a blank response"
                )));
            }

            let mut examples = Vec::with_capacity(definition.patterns.len());
            for pattern in &definition.patterns {
                let normalized = normalize(pattern);
                if normalized.is_empty() {
                    return Err(BanterError::corpus(format!(
                        "pattern {pattern:?} of intent {tag} normalizes to the empty string"
                    )));
                }
                // The same phrase under two different intents would make the
                // phrase-to-tag mapping ambiguous; reject it at load time.
                // Repeats inside one intent are retained as-is.
                match phrase_owners.get(&normalized) {
                    Some(owner) if owner != &tag => {
                        return Err(BanterError::corpus(format!(
                            "phrase {normalized:?} appears under both {owner} and {tag}"
                        )));
                    }
                    Some(_) => {}
                    None => {
                        phrase_owners.insert(normalized.clone(), tag.clone());
                    }
                }
                phrase_index.push(PhraseEntry {
                    phrase: normalized.clone(),
                    tag: tag.clone(),
                });
                examples.push(normalized);
            }

            tag_index.insert(tag.clone(), intents.len());
            intents.push(Intent {
                tag,
                examples,
                responses: definition.responses,
            });
        }

        Ok(Corpus {
            intents,
            phrase_index,
            tag_index,
        })
    }

    /// All intents in definition order.
    pub fn intents(&self) -> &[Intent] {
        &self.intents
    }

    /// Look up an intent by its tag.
    pub fn intent(&self, tag: &str) -> Option<&Intent> {
        self.tag_index.get(tag).map(|&idx| &self.intents[idx])
    }

    /// The flat ordered list of (phrase, tag) entries.
    pub fn entries(&self) -> &[PhraseEntry] {
        &self.phrase_index
    }

    /// All normalized example phrases, in corpus order.
    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.phrase_index.iter().map(|e| e.phrase.as_str())
    }

    /// Number of intents.
    pub fn len(&self) -> usize {
        self.intents.len()
    }

    /// Whether the corpus holds no intents.
    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }
}
