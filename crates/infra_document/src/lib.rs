//! Document Ingestion
//!
//! Turns an uploaded FNOL file into plain text for the extraction model.
//! Two formats are accepted: PDF and plain text.
//!
//! # Example
//!
//! ```rust
//! use infra_document::{extract_text, MediaType};
//!
//! let media_type = MediaType::detect(Some("fnol.txt"), None).unwrap();
//! let text = extract_text(b"Policy Number: POL-1", media_type).unwrap();
//! assert_eq!(text, "Policy Number: POL-1");
//! ```

pub mod media;
pub mod text;
pub mod error;

pub use media::MediaType;
pub use text::{decode_plain_text, extract_text};
pub use error::DocumentError;
