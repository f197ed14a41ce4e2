//! HTTP handler for the agent relay.

use axum::{Json, extract::State};
use tracing::debug;

use crate::{
    AppState,
    agent::{ATTR_ACTING_USER, ATTR_DISPLAY_USER, AgentInvocation},
    api::models::chat::{ChatRequest, ChatResponse},
    errors::Error,
};

/// Relay a chat message to the agent runtime and return the assembled reply.
///
/// The agent delivers its reply as an incremental stream of chunks; the full
/// stream is drained before responding, so callers always receive one complete
/// text body.
#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "chat",
    summary = "Relay chat message",
    description = "Submits the message to the agent runtime under the resolved session identity and returns the agent's full reply text.",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Agent reply assembled", body = ChatResponse),
        (status = 400, description = "Missing message"),
        (status = 500, description = "Missing agent configuration or agent runtime failure"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn relay_chat(State(state): State<AppState>, Json(request): Json<ChatRequest>) -> Result<Json<ChatResponse>, Error> {
    debug!(
        session_id = request.session_id.as_deref(),
        message_len = request.message.as_ref().map(|m| m.len()),
        "incoming chat"
    );

    let Some(message) = request.message.as_deref().filter(|s| !s.is_empty()) else {
        return Err(Error::Validation {
            message: "message required".to_string(),
        });
    };

    // Deployment guard, kept in addition to startup validation: a blank agent
    // target must never produce an outbound call.
    let agent_config = &state.config.agent;
    if agent_config.agent_id.is_empty() || agent_config.alias_id.is_empty() {
        return Err(Error::Configuration {
            message: "agent id/alias not configured".to_string(),
        });
    }

    let invocation = AgentInvocation {
        agent_id: agent_config.agent_id.clone(),
        alias_id: agent_config.alias_id.clone(),
        session_id: resolve_session_id(&state, &request),
        input_text: message.to_string(),
        session_attributes: session_attributes(&state, &request),
    };

    let reply = state.agent.invoke(invocation).await?;
    let text = reply.into_text().await?;

    Ok(Json(ChatResponse { ok: true, text }))
}

/// Client-supplied session when present, else the shared fallback session.
fn resolve_session_id(state: &AppState, request: &ChatRequest) -> String {
    request
        .session_id
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(&state.config.agent.fallback_session_id)
        .to_string()
}

/// Build the out-of-band session attributes for one invocation.
///
/// The acting identity is the configured demo identity whenever
/// `force_demo_identity` is enabled; the raw client identifier is only ever
/// attached as a display label.
fn session_attributes(state: &AppState, request: &ChatRequest) -> Vec<(String, String)> {
    let identity = &state.config.identity;
    let acting_user = if identity.force_demo_identity {
        identity.demo_user.clone()
    } else {
        request.user_id.clone().unwrap_or_else(|| identity.demo_user.clone())
    };

    let mut attributes = vec![(ATTR_ACTING_USER.to_string(), acting_user)];
    if let Some(user_id) = &request.user_id {
        attributes.push((ATTR_DISPLAY_USER.to_string(), user_id.clone()));
    }
    attributes
}
