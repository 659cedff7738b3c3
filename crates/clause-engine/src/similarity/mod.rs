//! Similarity scoring between aligned clause pairs
//!
//! Text scoring goes through the [`TextSimilarity`] trait so lexical and
//! embedding backends can be swapped without touching alignment or reporting.
//! Every backend must:
//! - return 100 for identical normalized strings
//! - approach 0 for disjoint vocabularies
//! - be symmetric in its two arguments
//!
//! Numeric scoring is positional over padded token sequences.

pub mod embedding;
pub mod sequence;
pub mod tfidf;

pub use embedding::{Embedder, EmbeddingSimilarity, HashedBagOfWords, LazyEmbedder};
pub use sequence::SequenceRatio;
pub use tfidf::TfIdfCosine;

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use shared_types::NumericToken;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Pluggable text comparison backend, scores in [0, 100]
pub trait TextSimilarity: Send + Sync {
    fn score(&self, a: &str, b: &str) -> f64;

    /// Get the name of this backend
    fn name(&self) -> &str;
}

/// Lowercase, drop punctuation other than periods, collapse whitespace
pub fn normalize_text(s: &str) -> String {
    let kept: String = s
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '.')
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Score two clause texts with `scorer`
///
/// Identical normalized text is exactly 100 whatever the backend's rounding.
pub fn score_text(scorer: &dyn TextSimilarity, a: &str, b: &str) -> f64 {
    if normalize_text(a) == normalize_text(b) {
        return 100.0;
    }
    let score = scorer.score(a, b);
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 100.0)
    }
}

/// Share of positions whose values match exactly, relative to the left side
///
/// Both inputs are expected to come from [`crate::alignment::pair_numbers`].
/// An empty left sequence scores 0.
pub fn score_numbers(padded_left: &[NumericToken], padded_right: &[NumericToken]) -> f64 {
    if padded_left.is_empty() {
        return 0.0;
    }
    let matches = padded_left
        .iter()
        .zip(padded_right)
        .filter(|(l, r)| !l.is_placeholder() && l.value == r.value)
        .count();
    matches as f64 / padded_left.len() as f64 * 100.0
}

/// Backends selectable from configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorerKind {
    #[default]
    Sequence,
    TfIdf,
    Embedding,
}

impl ScorerKind {
    pub fn build(&self) -> Arc<dyn TextSimilarity> {
        match self {
            ScorerKind::Sequence => Arc::new(SequenceRatio),
            ScorerKind::TfIdf => Arc::new(TfIdfCosine),
            ScorerKind::Embedding => {
                let embedder = LazyEmbedder::new(|| {
                    Ok(Box::new(HashedBagOfWords::default()) as Box<dyn Embedder>)
                });
                Arc::new(EmbeddingSimilarity::new(Arc::new(embedder)))
            }
        }
    }
}

impl fmt::Display for ScorerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScorerKind::Sequence => "sequence",
            ScorerKind::TfIdf => "tf_idf",
            ScorerKind::Embedding => "embedding",
        };
        f.write_str(name)
    }
}

impl FromStr for ScorerKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sequence" | "lcs" => Ok(ScorerKind::Sequence),
            "tf_idf" | "tfidf" | "tf-idf" => Ok(ScorerKind::TfIdf),
            "embedding" => Ok(ScorerKind::Embedding),
            other => Err(EngineError::Config(format!(
                "Unknown scorer: {}. Use 'sequence', 'tf_idf' or 'embedding'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tokens(values: &[&str]) -> Vec<NumericToken> {
        values
            .iter()
            .map(|v| {
                if v.is_empty() {
                    NumericToken::placeholder()
                } else {
                    NumericToken::new(*v, "", "")
                }
            })
            .collect()
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(
            normalize_text("  Cobertura, TOTAL:  $500.\n(vigente) "),
            "cobertura total 500. vigente"
        );
        assert_eq!(normalize_text("Ámbito Único"), "ámbito único");
    }

    #[test]
    fn test_score_text_identical_after_normalization() {
        for kind in [ScorerKind::Sequence, ScorerKind::TfIdf, ScorerKind::Embedding] {
            let scorer = kind.build();
            assert_eq!(
                score_text(scorer.as_ref(), "Foo, 100!", "foo   100"),
                100.0,
                "backend {}",
                kind
            );
        }
    }

    #[test]
    fn test_score_numbers_all_match() {
        assert_eq!(score_numbers(&tokens(&["100"]), &tokens(&["100"])), 100.0);
    }

    #[test]
    fn test_score_numbers_partial_match() {
        let left = tokens(&["30", "45"]);
        let right = tokens(&["30", "60"]);
        assert_eq!(score_numbers(&left, &right), 50.0);
    }

    #[test]
    fn test_score_numbers_padding_never_matches() {
        let left = tokens(&["30", ""]);
        let right = tokens(&["30", "45"]);
        assert_eq!(score_numbers(&left, &right), 50.0);
    }

    #[test]
    fn test_score_numbers_empty_left_is_zero() {
        assert_eq!(score_numbers(&[], &[]), 0.0);
    }

    #[test]
    fn test_scorer_kind_from_str() {
        assert_eq!("tfidf".parse::<ScorerKind>().unwrap(), ScorerKind::TfIdf);
        assert_eq!("Sequence".parse::<ScorerKind>().unwrap(), ScorerKind::Sequence);
        assert_eq!("embedding".parse::<ScorerKind>().unwrap(), ScorerKind::Embedding);
        assert!("neural".parse::<ScorerKind>().is_err());
    }
}
