//! Claims handlers

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::HeaderMap,
    Json,
};
use tracing::{debug, info};

use core_kernel::RequestId;
use infra_document::{extract_text, MediaType};

use crate::dto::claims::ProcessClaimResponse;
use crate::error::ApiError;
use crate::{AppState, REQUEST_ID_HEADER};

/// Multipart field carrying the FNOL document
pub const FILE_FIELD: &str = "file";

struct Upload {
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

/// Runs an uploaded FNOL document through the claim pipeline
///
/// A claim with missing mandatory fields is still a success; it is routed
/// to manual review.
pub async fn process_claim(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ProcessClaimResponse>, ApiError> {
    let request_id = request_id(&headers);
    let upload = read_upload(multipart?).await?;

    let media_type = MediaType::detect(upload.file_name.as_deref(), upload.content_type.as_deref())
        .ok_or_else(|| {
            ApiError::UnsupportedFileType(format!(
                "{} ({}); upload a PDF or plain-text file",
                upload.file_name.as_deref().unwrap_or("unnamed upload"),
                upload.content_type.as_deref().unwrap_or("no content type"),
            ))
        })?;

    if upload.bytes.is_empty() {
        return Err(ApiError::EmptyDocument);
    }

    info!(
        request_id = %request_id,
        media_type = %media_type,
        bytes = upload.bytes.len(),
        "FNOL document received"
    );

    let bytes = upload.bytes;
    let text = tokio::task::spawn_blocking(move || extract_text(&bytes, media_type))
        .await
        .map_err(|e| ApiError::Internal(format!("document worker failed: {}", e)))??;

    let decision = state.pipeline.process(request_id, &text).await?;
    Ok(Json(decision.into()))
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            debug!(field = ?field.name(), "Skipping multipart field");
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?.to_vec();
        return Ok(Upload {
            file_name,
            content_type,
            bytes,
        });
    }

    Err(ApiError::BadRequest(format!(
        "multipart field '{}' is required",
        FILE_FIELD
    )))
}

/// Reuses the id set by the request-id layer, or mints one
fn request_id(headers: &HeaderMap) -> RequestId {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
        .unwrap_or_else(RequestId::new_v7)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_request_id_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            REQUEST_ID_HEADER,
            HeaderValue::from_static("67e55044-10b1-426f-9247-bb680e5fe0c8"),
        );
        assert!(request_id(&headers)
            .to_string()
            .ends_with("67e55044-10b1-426f-9247-bb680e5fe0c8"));
    }

    #[test]
    fn test_unparsable_request_id_replaced() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("not-a-uuid"));
        assert!(!request_id(&headers).to_string().contains("not-a-uuid"));
    }
}
