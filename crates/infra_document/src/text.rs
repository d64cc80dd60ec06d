//! Text extraction

use std::panic;

use tracing::{debug, info};

use crate::error::DocumentError;
use crate::media::MediaType;

/// Extracts the text of an uploaded document
///
/// PDF pages are concatenated in order. Plain text is decoded as UTF-8,
/// falling back to Latin-1 for bytes that are not valid UTF-8. PDF parsing
/// is CPU-bound; async callers should run this on a blocking thread.
///
/// # Errors
///
/// - `DocumentError::Empty` if the upload is empty or yields only whitespace
/// - `DocumentError::Pdf` if the PDF cannot be parsed
pub fn extract_text(bytes: &[u8], media_type: MediaType) -> Result<String, DocumentError> {
    if bytes.is_empty() {
        return Err(DocumentError::Empty);
    }

    let text = match media_type {
        MediaType::Pdf => pdf_text(bytes)?,
        MediaType::PlainText => decode_plain_text(bytes),
    };

    if text.trim().is_empty() {
        return Err(DocumentError::Empty);
    }

    info!(
        media_type = %media_type,
        bytes = bytes.len(),
        chars = text.chars().count(),
        "Document text extracted"
    );
    Ok(text)
}

fn pdf_text(bytes: &[u8]) -> Result<String, DocumentError> {
    // The PDF parser panics on some malformed inputs
    panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
        .map_err(|_| DocumentError::Pdf("malformed PDF structure".to_string()))?
        .map_err(|e| DocumentError::Pdf(e.to_string()))
}

/// Decodes plain text as UTF-8, or Latin-1 if that fails
pub fn decode_plain_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.strip_prefix('\u{feff}').unwrap_or(text).to_string(),
        Err(_) => {
            debug!("Upload is not valid UTF-8, decoding as Latin-1");
            bytes.iter().map(|&b| char::from(b)).collect()
        }
    }
}
