//! Document ingestion errors

use thiserror::Error;

/// Errors raised while turning an upload into text
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The upload, or the text extracted from it, is empty
    #[error("Document contains no text")]
    Empty,

    /// The PDF could not be read
    #[error("Failed to parse PDF: {0}")]
    Pdf(String),
}
