//! Noise filter: strips headers, footers, contract metadata and page markers
//!
//! Patterns are applied in list order, each as a global replace with the empty
//! string. Anything the list does not anticipate passes through untouched.

use crate::error::EngineError;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// One removable boilerplate pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoisePattern {
    pub pattern: String,
    #[serde(default)]
    pub case_insensitive: bool,
}

impl NoisePattern {
    pub fn new(pattern: impl Into<String>, case_insensitive: bool) -> Self {
        Self {
            pattern: pattern.into(),
            case_insensitive,
        }
    }

    pub fn sensitive(pattern: impl Into<String>) -> Self {
        Self::new(pattern, false)
    }

    pub fn insensitive(pattern: impl Into<String>) -> Self {
        Self::new(pattern, true)
    }

    pub fn compile(&self) -> Result<Regex, EngineError> {
        RegexBuilder::new(&self.pattern)
            .case_insensitive(self.case_insensitive)
            .build()
            .map_err(|source| EngineError::InvalidPattern {
                pattern: self.pattern.clone(),
                source,
            })
    }
}

/// Compiled, ordered pattern list
#[derive(Debug, Clone, Default)]
pub struct NoiseFilter {
    patterns: Vec<Regex>,
}

impl NoiseFilter {
    pub fn new(patterns: &[NoisePattern]) -> Result<Self, EngineError> {
        let patterns = patterns
            .iter()
            .map(NoisePattern::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Remove every pattern, then drop blank lines and trim the rest
    pub fn clean(&self, raw: &str) -> String {
        let mut text = raw.to_string();
        let mut removed = 0usize;

        for re in &self.patterns {
            let hits = re.find_iter(&text).count();
            if hits > 0 {
                removed += hits;
                text = re.replace_all(&text, "").into_owned();
            }
        }

        tracing::debug!(patterns = self.len(), removed, "noise filter applied");

        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One-shot variant of [`NoiseFilter::clean`]
pub fn clean(raw: &str, patterns: &[NoisePattern]) -> Result<String, EngineError> {
    Ok(NoiseFilter::new(patterns)?.clean(raw))
}
