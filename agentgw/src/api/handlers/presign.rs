//! HTTP handler for upload grant issuance.

use axum::{Json, extract::State};

use crate::{
    AppState,
    api::models::presign::{PresignRequest, PresignResponse},
    errors::Error,
    storage,
};

/// Issue a time-boxed, scoped upload authorization.
///
/// Derives a namespaced object key from the request and obtains a presigned
/// PUT URL from the storage service. The authorization is valid for
/// [`storage::UPLOAD_URL_TTL`] and only for the declared content type.
#[utoipa::path(
    post,
    path = "/api/presign",
    tag = "uploads",
    summary = "Create upload grant",
    description = "Issues a short-lived presigned PUT URL scoped to a freshly derived object key and the declared content type.",
    request_body = PresignRequest,
    responses(
        (status = 200, description = "Upload grant issued", body = PresignResponse),
        (status = 400, description = "Missing filename or contentType"),
        (status = 500, description = "Storage service failure"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_upload_grant(
    State(state): State<AppState>,
    Json(request): Json<PresignRequest>,
) -> Result<Json<PresignResponse>, Error> {
    // The frontend sends empty strings for unset fields, so both count as missing here.
    let (Some(filename), Some(content_type)) = (
        request.filename.as_deref().filter(|s| !s.is_empty()),
        request.content_type.as_deref().filter(|s| !s.is_empty()),
    ) else {
        return Err(Error::Validation {
            message: "filename/contentType required".to_string(),
        });
    };

    let user_segment = storage::sanitize_user_segment(request.user_id.as_deref(), &state.config.identity.demo_user);
    let key = storage::build_object_key(&state.config.upload.key_prefix, &user_segment, filename);

    let grant = state.uploads.presign_put(&key, content_type).await?;

    Ok(Json(PresignResponse {
        ok: true,
        bucket: grant.bucket,
        key: grant.key,
        upload_url: grant.upload_url,
    }))
}
