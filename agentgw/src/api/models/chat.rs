//! API request/response models for the agent relay.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for `POST /api/chat`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// Message text forwarded verbatim to the agent; required and non-empty
    pub message: Option<String>,
    /// Session identifier for multi-turn continuity; the configured fallback
    /// session is used when absent
    pub session_id: Option<String>,
    /// Free-text user identifier; see the acting-identity policy in
    /// [`crate::config::IdentityConfig`]
    pub user_id: Option<String>,
}

/// Successful response for `POST /api/chat`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub ok: bool,
    /// Full assembled reply text; empty when the agent returned no content
    pub text: String,
}
