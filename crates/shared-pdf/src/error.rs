use thiserror::Error;

/// Reasons a document yields no usable text
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid PDF: {0}")]
    InvalidPdf(String),

    #[error("Password-protected PDF")]
    PasswordProtected,

    #[error("No extractable text (scanned PDF or empty document)")]
    NoText,

    #[error("PDF extraction failed: {0}")]
    Extraction(String),
}
