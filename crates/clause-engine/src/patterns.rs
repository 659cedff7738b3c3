//! Regex patterns shared by the segmenter, extractors and noise filter

use crate::noise::NoisePattern;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Clause code: `MD.018.081`. Wrong digit groupings never match.
    pub static ref CLAUSE_CODE_PATTERN: Regex =
        Regex::new(r"\b[A-Z]{2}\.[0-9]{3}\.[0-9]{3}\b").unwrap();

    /// Maximal digit run bounded on both sides
    pub static ref NUMBER_PATTERN: Regex = Regex::new(r"\b[0-9]+\b").unwrap();

    /// Terms for the TF-IDF vector space (two or more word characters)
    pub static ref TERM_PATTERN: Regex = Regex::new(r"\b\w\w+\b").unwrap();
}

/// Boilerplate commonly left behind by PDF extraction of policy documents
///
/// Ordered from most to least specific so shorter patterns never eat part of
/// a longer header first.
pub fn default_noise_patterns() -> Vec<NoisePattern> {
    vec![
        // Page markers
        NoisePattern::insensitive(r"p[áa]gina\s+\d+\s+de\s+\d+"),
        NoisePattern::insensitive(r"page\s+\d+\s+of\s+\d+"),
        // Contract metadata headers
        NoisePattern::insensitive(
            r"fecha\s+de\s+impresi[óo]n\s*:?\s*\d{1,2}/\d{1,2}/\d{2,4}(?:\s+\d{1,2}:\d{2}(?::\d{2})?)?",
        ),
        NoisePattern::insensitive(r"p[óo]liza\s+(?:no\.?|n[úu]mero|#)\s*:?\s*[0-9][0-9/-]*"),
        NoisePattern::insensitive(r"contrato\s+(?:no\.?|n[úu]mero|#)\s*:?\s*[0-9][0-9/-]*"),
        // Footer page numbers such as "- 3 -", on LF or CRLF lines
        NoisePattern::sensitive(r"(?mR)^[ \t]*-[ \t]*\d+[ \t]*-[ \t]*$"),
        NoisePattern::sensitive(r"\x0C"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clause_code_pattern_matches_well_formed_codes() {
        assert!(CLAUSE_CODE_PATTERN.is_match("MD.018.081 Cobertura"));
        assert!(CLAUSE_CODE_PATTERN.is_match("Ver endoso (AB.123.456)"));
    }

    #[test]
    fn test_clause_code_pattern_rejects_wrong_grouping() {
        assert!(!CLAUSE_CODE_PATTERN.is_match("MD.18.081"));
        assert!(!CLAUSE_CODE_PATTERN.is_match("MD.018.0811"));
        assert!(!CLAUSE_CODE_PATTERN.is_match("md.018.081"));
        assert!(!CLAUSE_CODE_PATTERN.is_match("XMD.018.081"));
    }

    #[test]
    fn test_number_pattern_finds_digit_runs() {
        let found: Vec<&str> = NUMBER_PATTERN
            .find_iter("pagar $500 en 30 días, 1,000")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(found, vec!["500", "30", "1", "000"]);
    }

    #[test]
    fn test_default_noise_patterns_compile() {
        for p in default_noise_patterns() {
            assert!(p.compile().is_ok(), "pattern failed: {}", p.pattern);
        }
    }
}
