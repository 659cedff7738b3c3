//! Text extraction for policy documents
//!
//! Turns an uploaded PDF (or a plain-text export) into one flat Unicode
//! string. Everything downstream works on that string only.

pub mod error;
pub mod extract;

pub use error::ExtractionError;
pub use extract::{extract_text_from_bytes, extract_text_from_path, ExtractedText};
