//! Comparison report structures handed to renderers and exporters
//!
//! Exporters may format these values but must never rescore them.

use crate::types::{ClauseCode, NumericToken, Presence};

/// A percentage score, or the marker for "no clause to compare"
///
/// `Absent` is distinct from `Score(0.0)`: the latter means both clauses exist
/// but diverge completely.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Similarity {
    Score(f64),
    Absent,
}

impl Similarity {
    /// Clamp into [0, 100]; NaN is treated as no agreement
    pub fn score(value: f64) -> Self {
        if value.is_nan() {
            Similarity::Score(0.0)
        } else {
            Similarity::Score(value.clamp(0.0, 100.0))
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Similarity::Score(v) => Some(*v),
            Similarity::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Similarity::Absent)
    }

    /// Render as `"85.00%"`, or `"N/A"` when absent
    pub fn as_percentage(&self) -> String {
        match self {
            Similarity::Score(v) => format!("{:.2}%", v),
            Similarity::Absent => "N/A".to_string(),
        }
    }
}

impl From<Option<f64>> for Similarity {
    fn from(value: Option<f64>) -> Self {
        value.map(Similarity::score).unwrap_or(Similarity::Absent)
    }
}

impl From<Similarity> for Option<f64> {
    fn from(value: Similarity) -> Self {
        value.value()
    }
}

/// One clause code aligned across both documents
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AlignedClausePair {
    pub code: ClauseCode,
    pub presence: Presence,
    pub left_text: Option<String>,
    pub right_text: Option<String>,
    pub left_numbers: Vec<NumericToken>,
    pub right_numbers: Vec<NumericToken>,
    pub text_similarity: Similarity,
    pub numeric_similarity: Similarity,
}

/// Aggregate counts over both clause maps
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReportSummary {
    /// Distinct codes found in the Modelo document
    pub left_unique_codes: usize,
    /// Distinct codes found in the Verificación document
    pub right_unique_codes: usize,
    pub common_codes: usize,
    pub left_only: Vec<ClauseCode>,
    pub right_only: Vec<ClauseCode>,
}

/// Full clause-by-clause comparison, ordered lexically by code
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ComparisonReport {
    pub pairs: Vec<AlignedClausePair>,
    pub summary: ReportSummary,
}

impl ComparisonReport {
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, code: &ClauseCode) -> Option<&AlignedClausePair> {
        self.pairs.iter().find(|p| &p.code == code)
    }

    /// Mean text similarity over pairs present in both documents
    pub fn mean_text_similarity(&self) -> Option<f64> {
        let scores: Vec<f64> = self
            .pairs
            .iter()
            .filter_map(|p| p.text_similarity.value())
            .collect();
        if scores.is_empty() {
            None
        } else {
            Some(scores.iter().sum::<f64>() / scores.len() as f64)
        }
    }

    /// Flatten into export rows
    pub fn rows(&self) -> Vec<ReportRow> {
        self.pairs.iter().map(ReportRow::from).collect()
    }

    /// Generate a plain-text report
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        output.push_str("Comparación de Endosos: Modelo vs Verificación\n");
        output.push_str(&"=".repeat(60));
        output.push_str("\n\n");

        output.push_str(&format!(
            "Códigos únicos: Modelo {}, Verificación {}, comunes {}\n",
            self.summary.left_unique_codes,
            self.summary.right_unique_codes,
            self.summary.common_codes
        ));
        output.push_str(&format!(
            "Solo en Modelo: {}\n",
            join_codes(&self.summary.left_only)
        ));
        output.push_str(&format!(
            "Solo en Verificación: {}\n",
            join_codes(&self.summary.right_only)
        ));
        output.push_str(&format!(
            "Similitud media de texto: {}\n\n",
            self.mean_text_similarity()
                .map_or(Similarity::Absent, Similarity::score)
                .as_percentage()
        ));

        for pair in &self.pairs {
            output.push_str(&format!(
                "{:<12} {:<18} texto {:>8}  números {:>8}\n",
                pair.code.as_str(),
                pair.presence.label(),
                pair.text_similarity.as_percentage(),
                pair.numeric_similarity.as_percentage()
            ));
        }

        output
    }
}

fn join_codes(codes: &[ClauseCode]) -> String {
    if codes.is_empty() {
        return "-".to_string();
    }
    codes
        .iter()
        .map(ClauseCode::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Flat row consumed by table exporters (HTML, Excel, CSV, PDF)
///
/// Field names are the stable contract shared with the export layer.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReportRow {
    #[serde(rename = "Código")]
    pub code: String,
    #[serde(rename = "Presencia")]
    pub presence: String,
    #[serde(rename = "Texto Modelo")]
    pub left_text: String,
    #[serde(rename = "Texto Verificación")]
    pub right_text: String,
    #[serde(rename = "Números Modelo")]
    pub left_numbers: String,
    #[serde(rename = "Números Verificación")]
    pub right_numbers: String,
    #[serde(rename = "Similitud Texto")]
    pub text_similarity: String,
    #[serde(rename = "Similitud Numérica")]
    pub numeric_similarity: String,
}

impl From<&AlignedClausePair> for ReportRow {
    fn from(pair: &AlignedClausePair) -> Self {
        Self {
            code: pair.code.to_string(),
            presence: pair.presence.label().to_string(),
            left_text: pair.left_text.clone().unwrap_or_default(),
            right_text: pair.right_text.clone().unwrap_or_default(),
            left_numbers: join_numbers(&pair.left_numbers),
            right_numbers: join_numbers(&pair.right_numbers),
            text_similarity: pair.text_similarity.as_percentage(),
            numeric_similarity: pair.numeric_similarity.as_percentage(),
        }
    }
}

fn join_numbers(tokens: &[NumericToken]) -> String {
    tokens
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pair(code: &str, presence: Presence, text: Similarity) -> AlignedClausePair {
        AlignedClausePair {
            code: ClauseCode::parse(code).unwrap(),
            presence,
            left_text: Some("Cobertura de 500".to_string()),
            right_text: None,
            left_numbers: vec![NumericToken::new("500", "Cobertura de", "")],
            right_numbers: vec![NumericToken::placeholder()],
            text_similarity: text,
            numeric_similarity: text,
        }
    }

    #[test]
    fn test_similarity_clamps_and_formats() {
        assert_eq!(Similarity::score(150.0), Similarity::Score(100.0));
        assert_eq!(Similarity::score(-3.0), Similarity::Score(0.0));
        assert_eq!(Similarity::score(f64::NAN), Similarity::Score(0.0));
        assert_eq!(Similarity::Score(85.0).as_percentage(), "85.00%");
        assert_eq!(Similarity::Absent.as_percentage(), "N/A");
    }

    #[test]
    fn test_similarity_serializes_absent_as_null() {
        let json = serde_json::to_string(&Similarity::Absent).unwrap();
        assert_eq!(json, "null");
        let json = serde_json::to_string(&Similarity::Score(42.5)).unwrap();
        assert_eq!(json, "42.5");
        let back: Similarity = serde_json::from_str("null").unwrap();
        assert!(back.is_absent());
    }

    #[test]
    fn test_row_uses_export_field_names() {
        let row = ReportRow::from(&pair("MD.018.081", Presence::LeftOnly, Similarity::Absent));
        let value = serde_json::to_value(&row).unwrap();

        assert_eq!(value["Código"], "MD.018.081");
        assert_eq!(value["Presencia"], "Solo Modelo");
        assert_eq!(value["Similitud Texto"], "N/A");
        assert_eq!(value["Similitud Numérica"], "N/A");
        assert_eq!(value["Números Modelo"], "Cobertura de [500] ");
        assert_eq!(value["Números Verificación"], "-");
        assert_eq!(value["Texto Verificación"], "");
    }

    #[test]
    fn test_mean_text_similarity_ignores_absent() {
        let report = ComparisonReport {
            pairs: vec![
                pair("AA.000.001", Presence::BothPresent, Similarity::Score(100.0)),
                pair("AA.000.002", Presence::BothPresent, Similarity::Score(50.0)),
                pair("AA.000.003", Presence::LeftOnly, Similarity::Absent),
            ],
            summary: ReportSummary::default(),
        };
        assert_eq!(report.mean_text_similarity(), Some(75.0));
        assert_eq!(ComparisonReport::default().mean_text_similarity(), None);
    }

    #[test]
    fn test_to_text_lists_each_code() {
        let report = ComparisonReport {
            pairs: vec![pair("AA.000.001", Presence::BothPresent, Similarity::Score(100.0))],
            summary: ReportSummary {
                left_unique_codes: 1,
                right_unique_codes: 1,
                common_codes: 1,
                left_only: vec![],
                right_only: vec![],
            },
        };
        let text = report.to_text();
        assert!(text.contains("AA.000.001"));
        assert!(text.contains("100.00%"));
        assert!(text.contains("Solo en Modelo: -"));
        assert!(text.contains("Similitud media de texto: 100.00%"));
    }

    #[test]
    fn test_to_text_mean_is_na_without_common_codes() {
        let report = ComparisonReport {
            pairs: vec![pair("AA.000.001", Presence::LeftOnly, Similarity::Absent)],
            summary: ReportSummary::default(),
        };
        assert!(report.to_text().contains("Similitud media de texto: N/A"));
    }
}
