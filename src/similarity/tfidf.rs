//! TF-IDF cosine similarity fitted on the pair being compared.

use crate::similarity::SimilarityStrategy;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"));

/// Cosine similarity of TF-IDF vectors built from the two texts alone.
///
/// Tokens are runs of two or more word characters, lowercased. Term weights
/// are raw counts times smoothed idf `ln(3 / (1 + df)) + 1`, L2-normalized.
#[derive(Debug, Clone, Copy, Default)]
pub struct TfIdfCosine;

impl SimilarityStrategy for TfIdfCosine {
    fn score(&self, a: &str, b: &str) -> f64 {
        let a = term_counts(a);
        let b = term_counts(b);
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }

        let wa = weights(&a, &b);
        let wb = weights(&b, &a);

        let dot: f64 = wa
            .iter()
            .filter_map(|(term, x)| wb.get(term).map(|y| x * y))
            .sum();
        let norm_a = wa.values().map(|x| x * x).sum::<f64>().sqrt();
        let norm_b = wb.values().map(|x| x * x).sum::<f64>().sqrt();
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        snap(dot / (norm_a * norm_b) * 100.0)
    }
}

/// Rounds away floating-point noise so identical texts score exactly 100.
fn snap(score: f64) -> f64 {
    ((score * 1e9).round() / 1e9).clamp(0.0, 100.0)
}

fn term_counts(text: &str) -> BTreeMap<String, f64> {
    let lower = text.to_lowercase();
    let mut counts = BTreeMap::new();
    for m in TOKEN_RE.find_iter(&lower) {
        *counts.entry(m.as_str().to_string()).or_insert(0.0) += 1.0;
    }
    counts
}

fn weights<'a>(
    own: &'a BTreeMap<String, f64>,
    other: &BTreeMap<String, f64>,
) -> BTreeMap<&'a str, f64> {
    own.iter()
        .map(|(term, tf)| {
            let df = if other.contains_key(term) { 2.0 } else { 1.0 };
            let idf = (3.0_f64 / (1.0 + df)).ln() + 1.0;
            (term.as_str(), tf * idf)
        })
        .collect()
}
