//! Engine configuration loaded from TOML
//!
//! Every field is optional; anything left out falls back to the defaults.
//!
//! ```toml
//! context_size = 20
//! scorer = "tf_idf"
//!
//! [[patterns]]
//! pattern = 'p[áa]gina\s+\d+\s+de\s+\d+'
//! case_insensitive = true
//! ```

use crate::error::EngineError;
use crate::extractors::DEFAULT_CONTEXT_SIZE;
use crate::noise::NoisePattern;
use crate::patterns::default_noise_patterns;
use crate::similarity::ScorerKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Boilerplate removed before segmentation, applied in order
    #[serde(default = "default_noise_patterns")]
    pub patterns: Vec<NoisePattern>,
    /// Characters captured on each side of a numeric token
    #[serde(default = "default_context_size")]
    pub context_size: usize,
    /// Text similarity backend
    #[serde(default)]
    pub scorer: ScorerKind,
}

fn default_context_size() -> usize {
    DEFAULT_CONTEXT_SIZE
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            patterns: default_noise_patterns(),
            context_size: DEFAULT_CONTEXT_SIZE,
            scorer: ScorerKind::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, EngineError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(s: &str) -> Result<Self, EngineError> {
        toml::from_str(s).map_err(|e| EngineError::Config(e.to_string()))
    }
}
