//! Pairwise text similarity and the record match predicate.
//!
//! A single [`SimilarityStrategy`] is chosen per run from
//! [`SimilarityMethod`] and shared by the grouping and sub-grouping passes.

mod scorer;
mod tfidf;
mod token_sort;

pub use scorer::Scorer;
pub use tfidf::TfIdfCosine;
pub use token_sort::TokenSort;

use crate::config::SimilarityMethod;

/// A symmetric text similarity on a 0-100 scale.
pub trait SimilarityStrategy {
    /// Score two strings. Identical non-empty strings score 100.
    fn score(&self, a: &str, b: &str) -> f64;
}

/// Build the strategy for a configured method.
pub fn strategy_for(method: SimilarityMethod) -> Box<dyn SimilarityStrategy + Send + Sync> {
    match method {
        SimilarityMethod::TokenSort => Box::new(TokenSort),
        SimilarityMethod::TfidfCosine => Box::new(TfIdfCosine),
    }
}
