//! PDF and plain-text extraction
//!
//! Pages come back from pdf-extract separated by form feeds; they are joined
//! with newlines so clause text can run across a page break.

use crate::error::ExtractionError;
use pdf_extract::extract_text_from_mem;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Fewer non-whitespace characters than this means nothing usable came out
const MIN_TEXT_CHARS: usize = 10;

/// Flat text of one document plus the page count it was built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedText {
    pub text: String,
    pub page_count: usize,
}

/// Extract the text of a PDF held in memory
pub fn extract_text_from_bytes(pdf_bytes: &[u8]) -> Result<ExtractedText, ExtractionError> {
    let raw = extract_text_from_mem(pdf_bytes).map_err(|e| {
        let msg = e.to_string();
        let lower = msg.to_lowercase();

        if lower.contains("encrypted") || lower.contains("password") {
            ExtractionError::PasswordProtected
        } else if lower.contains("invalid")
            || lower.contains("malformed")
            || lower.contains("corrupt")
        {
            ExtractionError::InvalidPdf(msg)
        } else {
            ExtractionError::Extraction(msg)
        }
    })?;

    let extracted = join_pages(&raw);
    tracing::debug!(
        pages = extracted.page_count,
        chars = extracted.text.len(),
        "extracted pdf text"
    );
    ensure_usable(extracted)
}

/// Extract text from a file on disk
///
/// `.pdf` files go through the PDF extractor; anything else is read as UTF-8.
pub fn extract_text_from_path<P: AsRef<Path>>(path: P) -> Result<ExtractedText, ExtractionError> {
    let path = path.as_ref();
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);

    if is_pdf {
        let bytes = fs::read(path)?;
        extract_text_from_bytes(&bytes)
    } else {
        let text = fs::read_to_string(path)?;
        ensure_usable(join_pages(&text))
    }
}

fn join_pages(raw: &str) -> ExtractedText {
    let pages: Vec<&str> = raw
        .split('\x0C')
        .filter(|page| !page.trim().is_empty())
        .collect();

    ExtractedText {
        text: pages.join("\n"),
        page_count: pages.len(),
    }
}

fn ensure_usable(extracted: ExtractedText) -> Result<ExtractedText, ExtractionError> {
    let visible = extracted
        .text
        .chars()
        .filter(|c| !c.is_whitespace())
        .count();
    if visible < MIN_TEXT_CHARS {
        return Err(ExtractionError::NoText);
    }
    Ok(extracted)
}
