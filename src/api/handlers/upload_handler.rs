//! File upload handlers for comment attachments.

use axum::{
    extract::{Multipart, State},
    routing::post,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::errors::{AppError, AppResult};
use crate::infra::StoredFile;
use crate::types::{Created, NoContent};

/// Upload deletion request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DeleteUploadRequest {
    #[validate(length(min = 1, message = "File URL is required"))]
    #[schema(example = "/uploads/3f2a-offer.pdf")]
    pub file_url: String,
}

/// Upload routes.
pub fn upload_routes() -> Router<AppState> {
    Router::new().route("/", post(upload_file).delete(delete_file))
}

/// Upload a file
///
/// Expects a multipart form with a single `file` field. Returns the stored
/// metadata to reference from a comment.
#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "Uploads",
    security(("bearer_auth" = [])),
    request_body(content = Vec<u8>, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "File stored", body = StoredFile),
        (status = 400, description = "Missing file field or file too large")
    )
)]
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Created<StoredFile>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let original_name = field
            .file_name()
            .map(|n| n.to_string())
            .unwrap_or_else(|| "file".to_string());
        let content_type = field
            .content_type()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::bad_request(e.to_string()))?;

        let stored = state
            .services
            .uploads()
            .upload(&original_name, &content_type, bytes.to_vec())
            .await?;
        return Ok(Created(stored));
    }

    Err(AppError::bad_request("Missing file field"))
}

/// Delete an uploaded file by its public URL
#[utoipa::path(
    delete,
    path = "/api/upload",
    tag = "Uploads",
    security(("bearer_auth" = [])),
    request_body = DeleteUploadRequest,
    responses(
        (status = 204, description = "File deleted"),
        (status = 400, description = "Malformed file URL"),
        (status = 404, description = "File not found")
    )
)]
pub async fn delete_file(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<DeleteUploadRequest>,
) -> AppResult<NoContent> {
    state.services.uploads().remove(&payload.file_url).await?;
    Ok(NoContent)
}
