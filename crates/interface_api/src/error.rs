//! API error handling

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use core_kernel::{CoreError, PortError};
use domain_claims::ClaimError;
use infra_document::DocumentError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Document contains no text")]
    EmptyDocument,

    #[error("Failed to read document: {0}")]
    DocumentParse(String),

    #[error("Upload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Malformed claim: {0}")]
    MalformedClaim(String),

    #[error("Extraction service unavailable: {0}")]
    ExtractionUnavailable(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_)
            | ApiError::UnsupportedFileType(_)
            | ApiError::EmptyDocument
            | ApiError::DocumentParse(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::MalformedClaim(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ExtractionUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::UnsupportedFileType(_) => "unsupported_file_type",
            ApiError::EmptyDocument => "empty_document",
            ApiError::DocumentParse(_) => "document_parse_error",
            ApiError::PayloadTooLarge(_) => "payload_too_large",
            ApiError::MalformedClaim(_) => "malformed_claim",
            ApiError::ExtractionUnavailable(_) => "extraction_unavailable",
            ApiError::Timeout(_) => "timeout",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(kind = self.kind(), error = %self, "Request failed");
        } else {
            warn!(kind = self.kind(), error = %self, "Request rejected");
        }

        let body = ErrorResponse {
            error: self.kind().to_string(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ClaimError> for ApiError {
    fn from(err: ClaimError) -> Self {
        match err {
            ClaimError::MalformedClaim(e) => ApiError::MalformedClaim(e.to_string()),
            e @ ClaimError::ExtractionUnavailable { .. } => ApiError::ExtractionUnavailable(e.to_string()),
            e @ ClaimError::RequestTimeout { .. } => ApiError::Timeout(e.to_string()),
            e @ ClaimError::UnknownFieldPath(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<DocumentError> for ApiError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::Empty => ApiError::EmptyDocument,
            DocumentError::Pdf(msg) => ApiError::DocumentParse(msg),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(err.body_text())
        } else {
            ApiError::BadRequest(err.body_text())
        }
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Errors that stop the server from starting
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] CoreError),

    #[error("Failed to initialise model client: {0}")]
    Client(#[from] PortError),
}
