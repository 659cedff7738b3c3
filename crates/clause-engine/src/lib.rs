//! Clause-by-clause comparison of two versions of an insurance policy
//!
//! Pipeline: noise filter → segmenter (per document) → alignment → numeric
//! extraction → similarity scoring → report.
//!
//! ```
//! use clause_engine::ClauseComparator;
//!
//! let comparator = ClauseComparator::default();
//! let report = comparator.compare_texts(
//!     "MD.018.081 Suma asegurada 500\nMD.018.082 Deducible 10",
//!     "MD.018.081 Suma asegurada 500",
//! );
//! assert_eq!(report.pairs.len(), 2);
//! assert_eq!(report.summary.left_only.len(), 1);
//! ```

pub mod alignment;
pub mod config;
pub mod error;
pub mod extractors;
pub mod noise;
pub mod patterns;
pub mod report;
pub mod segmenter;
pub mod similarity;

pub use config::EngineConfig;
pub use error::EngineError;
pub use noise::{NoiseFilter, NoisePattern};
pub use similarity::{ScorerKind, TextSimilarity};

use shared_types::{ClauseMap, ComparisonReport};
use std::fmt;
use std::sync::Arc;

/// Which of the two uploaded documents a result refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentSide {
    /// Reference document
    Modelo,
    /// Document checked against the reference
    Verificacion,
}

impl fmt::Display for DocumentSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSide::Modelo => f.write_str("Modelo"),
            DocumentSide::Verificacion => f.write_str("Verificación"),
        }
    }
}

/// A document whose text could not be extracted
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DocumentFailure {
    pub side: DocumentSide,
    pub reason: String,
}

impl fmt::Display for DocumentFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not process document {}: {}", self.side, self.reason)
    }
}

/// Report plus any extraction failures that degraded it
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ComparisonOutcome {
    pub report: ComparisonReport,
    pub failures: Vec<DocumentFailure>,
}

impl ComparisonOutcome {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Clause comparison entry point
pub struct ClauseComparator {
    filter: NoiseFilter,
    scorer: Arc<dyn TextSimilarity>,
    context_size: usize,
}

impl ClauseComparator {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let filter = NoiseFilter::new(&config.patterns)?;
        if filter.is_empty() {
            tracing::warn!("no noise patterns configured, text is segmented as extracted");
        }

        Ok(Self {
            filter,
            scorer: config.scorer.build(),
            context_size: config.context_size,
        })
    }

    /// Replace the text similarity backend
    pub fn with_scorer(mut self, scorer: Arc<dyn TextSimilarity>) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn scorer_name(&self) -> &str {
        self.scorer.name()
    }

    pub fn noise_pattern_count(&self) -> usize {
        self.filter.len()
    }

    /// Clean and segment one document's raw text
    pub fn segment_document(&self, raw: &str) -> ClauseMap {
        segmenter::segment(&self.filter.clean(raw))
    }

    /// Compare two already-segmented documents
    pub fn compare_maps(&self, left: &ClauseMap, right: &ClauseMap) -> ComparisonReport {
        report::build(left, right, self.scorer.as_ref(), self.context_size)
    }

    /// Compare two raw texts; both documents are segmented in parallel
    pub fn compare_texts(&self, left_raw: &str, right_raw: &str) -> ComparisonReport {
        let (left, right) = rayon::join(
            || self.segment_document(left_raw),
            || self.segment_document(right_raw),
        );
        self.compare_maps(&left, &right)
    }

    /// Compare the results of an external text extraction
    ///
    /// A failed side is compared as an empty document and reported in
    /// `failures`; the other side is still processed.
    pub fn compare_extracted<E: fmt::Display>(
        &self,
        left: Result<String, E>,
        right: Result<String, E>,
    ) -> ComparisonOutcome {
        let mut failures = Vec::new();
        let left = self.accept(DocumentSide::Modelo, left, &mut failures);
        let right = self.accept(DocumentSide::Verificacion, right, &mut failures);

        ComparisonOutcome {
            report: self.compare_texts(&left, &right),
            failures,
        }
    }

    fn accept<E: fmt::Display>(
        &self,
        side: DocumentSide,
        extracted: Result<String, E>,
        failures: &mut Vec<DocumentFailure>,
    ) -> String {
        match extracted {
            Ok(text) => text,
            Err(e) => {
                let failure = DocumentFailure {
                    side,
                    reason: e.to_string(),
                };
                tracing::warn!("{}", failure);
                failures.push(failure);
                String::new()
            }
        }
    }
}

impl Default for ClauseComparator {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self {
            filter: NoiseFilter::new(&config.patterns).unwrap_or_default(),
            scorer: config.scorer.build(),
            context_size: config.context_size,
        }
    }
}
