//! Supported upload formats

use std::fmt;

use serde::{Deserialize, Serialize};

/// Formats an FNOL document may arrive in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Pdf,
    PlainText,
}

impl MediaType {
    /// Detects the format of an upload
    ///
    /// The file extension decides when there is one; the declared content
    /// type is consulted only for files without an extension. Returns
    /// `None` for anything else.
    ///
    /// ```rust
    /// use infra_document::MediaType;
    ///
    /// assert_eq!(MediaType::detect(Some("claim.PDF"), None), Some(MediaType::Pdf));
    /// assert_eq!(MediaType::detect(Some("notes"), Some("text/plain; charset=utf-8")), Some(MediaType::PlainText));
    /// assert_eq!(MediaType::detect(Some("scan.png"), Some("application/pdf")), None);
    /// ```
    pub fn detect(file_name: Option<&str>, content_type: Option<&str>) -> Option<Self> {
        match file_name.and_then(extension) {
            Some(ext) => Self::from_extension(&ext),
            None => content_type.and_then(Self::from_content_type),
        }
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Some(MediaType::Pdf),
            "txt" => Some(MediaType::PlainText),
            _ => None,
        }
    }

    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "application/pdf" => Some(MediaType::Pdf),
            "text/plain" => Some(MediaType::PlainText),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Pdf => "application/pdf",
            MediaType::PlainText => "text/plain",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn extension(file_name: &str) -> Option<String> {
    let base = file_name.rsplit(['/', '\\']).next()?;
    let (stem, ext) = base.rsplit_once('.')?;
    (!stem.is_empty() && !ext.is_empty()).then(|| ext.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_wins_over_content_type() {
        assert_eq!(
            MediaType::detect(Some("claim.txt"), Some("application/pdf")),
            Some(MediaType::PlainText)
        );
    }

    #[test]
    fn test_unknown_extension_is_unsupported() {
        assert_eq!(MediaType::detect(Some("claim.docx"), Some("text/plain")), None);
    }

    #[test]
    fn test_dotfile_has_no_extension() {
        assert_eq!(MediaType::detect(Some(".pdf"), Some("text/plain")), Some(MediaType::PlainText));
    }

    #[test]
    fn test_path_components_ignored() {
        assert_eq!(MediaType::detect(Some("uploads.d/claim"), Some("application/pdf")), Some(MediaType::Pdf));
    }

    #[test]
    fn test_nothing_to_go_on() {
        assert_eq!(MediaType::detect(None, None), None);
    }
}
