use super::{normalize_text, TextSimilarity};
use crate::patterns::TERM_PATTERN;
use std::collections::BTreeMap;

/// Cosine similarity in a TF-IDF space built from exactly the two texts
///
/// Smoothed idf: `ln((1 + n) / (1 + df)) + 1` with `n = 2`, vectors L2
/// normalized. Terms are runs of two or more word characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct TfIdfCosine;

const DOCUMENTS: f64 = 2.0;

impl TextSimilarity for TfIdfCosine {
    fn score(&self, a: &str, b: &str) -> f64 {
        let a = normalize_text(a);
        let b = normalize_text(b);

        // term -> (count in a, count in b)
        let mut vocabulary: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
        for m in TERM_PATTERN.find_iter(&a) {
            vocabulary.entry(m.as_str()).or_default().0 += 1.0;
        }
        for m in TERM_PATTERN.find_iter(&b) {
            vocabulary.entry(m.as_str()).or_default().1 += 1.0;
        }

        if vocabulary.is_empty() {
            return if a == b { 100.0 } else { 0.0 };
        }

        let mut dot = 0.0;
        let mut norm_a = 0.0;
        let mut norm_b = 0.0;

        for (tf_a, tf_b) in vocabulary.values() {
            let df = (*tf_a > 0.0) as u8 as f64 + (*tf_b > 0.0) as u8 as f64;
            let idf = ((1.0 + DOCUMENTS) / (1.0 + df)).ln() + 1.0;
            let wa = tf_a * idf;
            let wb = tf_b * idf;
            dot += wa * wb;
            norm_a += wa * wa;
            norm_b += wb * wb;
        }

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        (dot / (norm_a.sqrt() * norm_b.sqrt()) * 100.0).clamp(0.0, 100.0)
    }

    fn name(&self) -> &str {
        "tf_idf"
    }
}
