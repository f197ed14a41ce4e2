//! Agent runtime abstraction layer.
//!
//! This module defines the [`AgentRuntime`] trait which abstracts the remote
//! conversational agent service, and [`AgentReply`], the streamed reply returned
//! by an invocation.
//!
//! The runtime delivers its reply as an incremental sequence of binary chunks
//! over a single logical response stream. This service does not forward partial
//! output to its own callers: [`AgentReply::into_text`] drains the stream in
//! arrival order, accumulates the raw bytes, and decodes once into the final
//! text.

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::stream::{BoxStream, Stream, StreamExt, TryStreamExt};

pub mod bedrock;

pub use bedrock::BedrockAgentRuntime;

/// Session attribute carrying the acting identity of an invocation.
///
/// Influences which identity the agent acts as downstream; it never appears in
/// the natural-language input. See [`crate::config::IdentityConfig`] for the
/// policy that decides its value.
pub const ATTR_ACTING_USER: &str = "actingUser";

/// Session attribute carrying the raw client-supplied user identifier as a
/// non-authoritative display label. Never used for authorization decisions.
pub const ATTR_DISPLAY_USER: &str = "displayUser";

/// Result type for agent runtime operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Errors that can occur while invoking the agent or reading its reply
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// Establishing the invocation failed (credentials, network, permission)
    #[error("Agent invocation failed: {0}")]
    Invoke(String),

    /// Reading the reply stream failed mid-flight
    #[error("Agent reply stream failed: {0}")]
    Stream(String),
}

/// One outbound agent invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentInvocation {
    /// Target agent identifier
    pub agent_id: String,
    /// Target alias identifier
    pub alias_id: String,
    /// Session identifier (client-supplied or the shared fallback)
    pub session_id: String,
    /// Raw natural-language message text
    pub input_text: String,
    /// Out-of-band session attributes ([`ATTR_ACTING_USER`], [`ATTR_DISPLAY_USER`])
    pub session_attributes: Vec<(String, String)>,
}

/// The streamed reply to one invocation: a finite, non-restartable sequence of
/// byte chunks.
pub struct AgentReply {
    chunks: BoxStream<'static, Result<Bytes>>,
}

impl AgentReply {
    pub fn new(chunks: impl Stream<Item = Result<Bytes>> + Send + 'static) -> Self {
        Self { chunks: chunks.boxed() }
    }

    /// A reply with a fixed set of chunks. Useful for stubs and tests.
    pub fn from_chunks(chunks: Vec<Bytes>) -> Self {
        Self::new(futures::stream::iter(chunks.into_iter().map(Ok)))
    }

    /// Drain the stream and assemble the full reply text.
    ///
    /// Chunks are consumed in arrival order and the accumulated bytes decoded
    /// once as UTF-8, so a multi-byte character split across chunk boundaries
    /// survives reassembly. An empty stream yields an empty string, not an
    /// error.
    pub async fn into_text(mut self) -> Result<String> {
        let mut buf = BytesMut::new();
        while let Some(chunk) = self.chunks.try_next().await? {
            buf.extend_from_slice(&chunk);
        }
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// Abstract agent runtime interface.
///
/// Implementors submit an invocation to the remote agent service and expose its
/// incremental reply as an [`AgentReply`].
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    async fn invoke(&self, invocation: AgentInvocation) -> Result<AgentReply>;
}
