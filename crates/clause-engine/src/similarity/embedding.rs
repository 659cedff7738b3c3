//! Embedding-backed similarity
//!
//! A neural model plugs in through [`Embedder`]. Model loading is expensive, so
//! [`LazyEmbedder`] defers construction to the first call and keeps the model
//! for as long as the owner holds it; dropping it tears the model down.

use super::{normalize_text, TextSimilarity};
use crate::error::EngineError;
use crate::patterns::TERM_PATTERN;
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Turns text into a dense vector
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EngineError>;
}

type EmbedderInit = Box<dyn Fn() -> Result<Box<dyn Embedder>, EngineError> + Send + Sync>;

/// Embedder constructed once, on first use
pub struct LazyEmbedder {
    cell: OnceCell<Box<dyn Embedder>>,
    init: EmbedderInit,
}

impl LazyEmbedder {
    pub fn new<F>(init: F) -> Self
    where
        F: Fn() -> Result<Box<dyn Embedder>, EngineError> + Send + Sync + 'static,
    {
        Self {
            cell: OnceCell::new(),
            init: Box::new(init),
        }
    }

    fn get(&self) -> Result<&dyn Embedder, EngineError> {
        self.cell
            .get_or_try_init(|| {
                tracing::info!("initializing embedding backend");
                (self.init)()
            })
            .map(|boxed| &**boxed)
    }
}

impl Embedder for LazyEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EngineError> {
        self.get()?.embed(text)
    }
}

/// Deterministic feature-hashing bag of words
///
/// Stands in for a neural model where none is configured; terms hash into a
/// fixed number of buckets.
#[derive(Debug, Clone)]
pub struct HashedBagOfWords {
    dimensions: usize,
}

impl HashedBagOfWords {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }
}

impl Default for HashedBagOfWords {
    fn default() -> Self {
        Self::new(512)
    }
}

impl Embedder for HashedBagOfWords {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EngineError> {
        let normalized = normalize_text(text);
        let mut vector = vec![0.0f32; self.dimensions];
        for m in TERM_PATTERN.find_iter(&normalized) {
            let bucket = (fnv1a(m.as_str()) % self.dimensions as u64) as usize;
            vector[bucket] += 1.0;
        }
        Ok(vector)
    }
}

fn fnv1a(s: &str) -> u64 {
    s.bytes().fold(0xcbf29ce484222325u64, |hash, byte| {
        (hash ^ byte as u64).wrapping_mul(0x100000001b3)
    })
}

/// Cosine similarity of embeddings, negative cosine clamped to 0
pub struct EmbeddingSimilarity {
    embedder: Arc<dyn Embedder>,
}

impl EmbeddingSimilarity {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }
}

impl TextSimilarity for EmbeddingSimilarity {
    fn score(&self, a: &str, b: &str) -> f64 {
        let vectors = self
            .embedder
            .embed(a)
            .and_then(|va| self.embedder.embed(b).map(|vb| (va, vb)));

        match vectors {
            Ok((va, vb)) => (cosine(&va, &vb) * 100.0).clamp(0.0, 100.0),
            Err(e) => {
                tracing::warn!(error = %e, "embedding failed, scoring pair as 0");
                0.0
            }
        }
    }

    fn name(&self) -> &str {
        "embedding"
    }
}

fn cosine(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingEmbedder;

    impl Embedder for FailingEmbedder {
        fn embed(&self, _text: &str) -> Result<Vec<f32>, EngineError> {
            Err(EngineError::Embedding("model unavailable".to_string()))
        }
    }

    #[test]
    fn test_lazy_embedder_initializes_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let lazy = LazyEmbedder::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(HashedBagOfWords::default()) as Box<dyn Embedder>)
        });

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        lazy.embed("uno").unwrap();
        lazy.embed("dos").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_lazy_embedder_surfaces_init_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let lazy = LazyEmbedder::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(EngineError::Embedding("no weights".to_string()))
        });

        assert!(lazy.embed("texto").is_err());
        assert!(lazy.embed("texto").is_err());
        // A failed load is retried on the next call
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_hashed_embedding_similarity() {
        let scorer = EmbeddingSimilarity::new(Arc::new(HashedBagOfWords::default()));
        let same = scorer.score("cobertura total", "cobertura total");
        assert!((same - 100.0).abs() < 1e-6);

        let a = "suma asegurada de daños";
        let b = "suma asegurada por robo";
        assert_eq!(scorer.score(a, b), scorer.score(b, a));
    }

    #[test]
    fn test_failing_embedder_scores_zero() {
        let scorer = EmbeddingSimilarity::new(Arc::new(FailingEmbedder));
        assert_eq!(scorer.score("a b", "a b"), 0.0);
    }

    #[test]
    fn test_cosine_mismatched_lengths() {
        assert_eq!(cosine(&[1.0, 0.0], &[1.0]), 0.0);
        assert_eq!(cosine(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }
}
