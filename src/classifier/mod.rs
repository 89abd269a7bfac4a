//! Statistical intent classification.
//!
//! The classifier is a hand-rolled multinomial logistic regression fit once
//! at startup over the bag-of-words vectors of all example phrases. When
//! every label has at least two examples, the regularization strength is
//! selected by stratified cross-validation; otherwise a plain fit is the
//! only option. Inference is a deterministic argmax with no probability
//! threshold, the confidence gate already happened in the lexical matcher.

pub mod folds;
pub mod logistic;

// Re-export commonly used types
pub use folds::*;
pub use logistic::*;
