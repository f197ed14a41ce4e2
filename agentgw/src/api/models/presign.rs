//! API request/response models for upload grants.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for `POST /api/presign`.
///
/// `filename` and `content_type` are modelled as optional so that their absence
/// is reported through the uniform error body rather than a deserialization
/// rejection; the handler enforces their presence.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PresignRequest {
    /// Declared filename; only its extension survives into the object key
    pub filename: Option<String>,
    /// Content type the upload authorization is scoped to
    pub content_type: Option<String>,
    /// Free-text user identifier used to namespace the object key
    pub user_id: Option<String>,
}

/// Successful response for `POST /api/presign`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PresignResponse {
    pub ok: bool,
    /// Bucket that will receive the upload
    pub bucket: String,
    /// Object key the authorization is scoped to
    pub key: String,
    /// Time-boxed presigned PUT URL
    pub upload_url: String,
}
