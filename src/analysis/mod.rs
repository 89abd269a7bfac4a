//! Text analysis for queries and corpus phrases.
//!
//! Every piece of text that enters the engine, whether an example phrase at
//! corpus load time or a user query at request time, passes through the same
//! [`normalize`] function. That symmetry is what makes fuzzy matching and
//! vocabulary lookups meaningful.

pub mod normalizer;
pub mod tokenizer;

// Re-export commonly used functions
pub use normalizer::normalize;
pub use tokenizer::tokenize;
