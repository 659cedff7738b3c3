//! Endoso comparison driver
//!
//! Extracts both documents, compares them clause by clause and renders the
//! result for the terminal or for a downstream exporter.

use anyhow::Context;
use clause_engine::{ClauseComparator, ComparisonOutcome, EngineConfig, ScorerKind};
use serde::Serialize;
use shared_types::ReportRow;
use std::path::Path;

/// How the report is written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Full report with numeric tokens, as JSON
    Json,
    /// Flat export rows with percentage strings, as JSON
    Rows,
    /// Plain-text summary table
    Text,
}

/// Build the engine configuration from an optional file plus CLI overrides
pub fn load_config(
    path: Option<&Path>,
    scorer: Option<&str>,
    context_size: Option<usize>,
) -> anyhow::Result<EngineConfig> {
    let mut config = match path {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => EngineConfig::default(),
    };

    if let Some(scorer) = scorer {
        config.scorer = scorer.parse::<ScorerKind>()?;
    }
    if let Some(size) = context_size {
        config.context_size = size;
    }

    Ok(config)
}

/// Extract both documents in parallel and compare them
pub fn compare_files(
    comparator: &ClauseComparator,
    modelo: &Path,
    verificacion: &Path,
) -> ComparisonOutcome {
    let extract = |path: &Path| {
        shared_pdf::extract_text_from_path(path).map(|extracted| {
            tracing::info!(
                file = %path.display(),
                pages = extracted.page_count,
                "document extracted"
            );
            extracted.text
        })
    };

    let (left, right) = rayon::join(|| extract(modelo), || extract(verificacion));
    comparator.compare_extracted(left, right)
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    generated_at: String,
    scorer: &'a str,
    #[serde(flatten)]
    outcome: &'a ComparisonOutcome,
}

#[derive(Serialize)]
struct RowsOutput {
    generated_at: String,
    rows: Vec<ReportRow>,
}

/// Render an outcome in the requested format
pub fn render(
    outcome: &ComparisonOutcome,
    scorer: &str,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let generated_at = chrono::Utc::now().to_rfc3339();

    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&JsonOutput {
            generated_at,
            scorer,
            outcome,
        })?,
        OutputFormat::Rows => serde_json::to_string_pretty(&RowsOutput {
            generated_at,
            rows: outcome.report.rows(),
        })?,
        OutputFormat::Text => {
            let mut text = outcome.report.to_text();
            for failure in &outcome.failures {
                text.push_str(&format!("\n{}", failure));
            }
            text
        }
    };

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn outcome() -> ComparisonOutcome {
        ClauseComparator::default().compare_extracted::<String>(
            Ok("MD.018.081 Suma asegurada 500".to_string()),
            Err("PDF protegido".to_string()),
        )
    }

    #[test]
    fn test_load_config_applies_overrides() {
        let config = load_config(None, Some("tfidf"), Some(5)).unwrap();
        assert_eq!(config.scorer, ScorerKind::TfIdf);
        assert_eq!(config.context_size, 5);
    }

    #[test]
    fn test_example_config_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("endoso.toml");
        let config = load_config(Some(&path), None, None).unwrap();
        assert_eq!(config.patterns.len(), 4);
        assert_eq!(config.context_size, 30);
        assert!(ClauseComparator::new(config).is_ok());
    }

    #[test]
    fn test_load_config_rejects_unknown_scorer() {
        assert!(load_config(None, Some("neural"), None).is_err());
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Some(Path::new("/nonexistent/endoso.toml")), None, None).unwrap_err();
        assert!(err.to_string().contains("Failed to load config file"));
    }

    #[test]
    fn test_render_json_includes_failures() {
        let rendered = render(&outcome(), "sequence", OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["scorer"], "sequence");
        assert_eq!(value["failures"][0]["side"], "verificacion");
        assert_eq!(value["report"]["pairs"][0]["code"], "MD.018.081");
        assert!(value["report"]["pairs"][0]["text_similarity"].is_null());
    }

    #[test]
    fn test_render_rows_uses_export_labels() {
        let rendered = render(&outcome(), "sequence", OutputFormat::Rows).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["rows"][0]["Similitud Texto"], "N/A");
    }

    #[test]
    fn test_render_text_lists_failures() {
        let rendered = render(&outcome(), "sequence", OutputFormat::Text).unwrap();
        assert!(rendered.contains("could not process document Verificación: PDF protegido"));
    }
}
