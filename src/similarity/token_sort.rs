//! Sorted-token edit-distance ratio.

use crate::similarity::SimilarityStrategy;
use rapidfuzz::distance::indel;

/// Compares texts after sorting their tokens, so word order does not matter.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenSort;

impl SimilarityStrategy for TokenSort {
    fn score(&self, a: &str, b: &str) -> f64 {
        let a = sorted_tokens(a);
        let b = sorted_tokens(b);
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        (indel::normalized_similarity(a.chars(), b.chars()) * 100.0).round_ties_even()
    }
}

fn sorted_tokens(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_lowercase().next().unwrap_or(c)
            } else {
                ' '
            }
        })
        .collect();
    let mut tokens: Vec<&str> = cleaned.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}
