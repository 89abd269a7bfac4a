//! # Banter
//!
//! An intent-matching chatbot engine for Rust.
//!
//! Given free-text input, the engine decides which of a fixed set of
//! intents the input expresses and returns one of that intent's canned
//! responses. Matching happens in two stages: fuzzy lexical matching of
//! the normalized input against the corpus of example phrases, then
//! statistical classification of the matched phrase with a bag-of-words
//! logistic regression trained once at startup.
//!
//! ## Features
//!
//! - Pure Rust implementation
//! - Weighted fuzzy ratio matching with a configurable confidence cutoff
//! - Cross-validated logistic regression over bag-of-words features
//! - Deterministic under fixed seeds, reentrant for concurrent callers
//!
//! ## Example
//!
//! ```no_run
//! use banter::corpus::Corpus;
//! use banter::engine::ChatEngine;
//!
//! # fn main() -> banter::error::Result<()> {
//! let corpus = Corpus::load_from_path("intents.json")?;
//! let engine = ChatEngine::train(corpus)?;
//! println!("{}", engine.respond("Hello!!"));
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod classifier;
pub mod cli;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod features;
pub mod matching;

pub mod prelude {
    //! Convenience re-exports of the most commonly used types.
    pub use crate::corpus::{Corpus, Intent, IntentDefinition};
    pub use crate::engine::{ChatEngine, EngineConfig, NO_MATCH_FALLBACK, UNKNOWN_INTENT_FALLBACK};
    pub use crate::error::{BanterError, Result};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
