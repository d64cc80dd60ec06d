//! Tests for upload text extraction

use infra_document::{decode_plain_text, extract_text, DocumentError, MediaType};
use proptest::prelude::*;

mod plain_text_tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        let text = extract_text(b"Policy Number: POL-1\nClaim Type: auto\n", MediaType::PlainText).unwrap();
        assert_eq!(text, "Policy Number: POL-1\nClaim Type: auto\n");
    }

    #[test]
    fn test_empty_upload_rejected() {
        assert_eq!(extract_text(b"", MediaType::PlainText), Err(DocumentError::Empty));
        assert_eq!(extract_text(b"", MediaType::Pdf), Err(DocumentError::Empty));
    }

    #[test]
    fn test_whitespace_only_rejected() {
        assert_eq!(extract_text(b" \n\t\r\n", MediaType::PlainText), Err(DocumentError::Empty));
    }

    proptest! {
        #[test]
        fn test_latin1_decoding_keeps_every_byte(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
            let decoded = decode_plain_text(&bytes);
            if std::str::from_utf8(&bytes).is_err() {
                prop_assert_eq!(decoded.chars().count(), bytes.len());
            }
        }
    }
}

mod pdf_tests {
    use super::*;

    #[test]
    fn test_garbage_is_pdf_error() {
        let err = extract_text(b"this is not a pdf at all", MediaType::Pdf).unwrap_err();
        assert!(matches!(err, DocumentError::Pdf(_)));
    }

    #[test]
    fn test_truncated_pdf_is_pdf_error() {
        let err = extract_text(b"%PDF-1.7\n1 0 obj\n<< /Type /Catalog", MediaType::Pdf).unwrap_err();
        assert!(matches!(err, DocumentError::Pdf(_)));
    }
}

mod detection_tests {
    use super::*;

    #[test]
    fn test_supported_extensions() {
        assert_eq!(MediaType::detect(Some("fnol.pdf"), None), Some(MediaType::Pdf));
        assert_eq!(MediaType::detect(Some("FNOL.TXT"), None), Some(MediaType::PlainText));
    }

    #[test]
    fn test_content_type_parameters_ignored() {
        assert_eq!(
            MediaType::detect(None, Some("Application/PDF; name=claim")),
            Some(MediaType::Pdf)
        );
    }

    #[test]
    fn test_unsupported_types() {
        assert_eq!(MediaType::detect(Some("photo.jpg"), None), None);
        assert_eq!(MediaType::detect(None, Some("image/png")), None);
    }
}
