//! Bedrock-backed agent runtime.

use async_trait::async_trait;
use aws_sdk_bedrockagentruntime::types::{ResponseStream, SessionState};
use bytes::Bytes;

use super::{AgentError, AgentInvocation, AgentReply, AgentRuntime, Result};

/// Agent runtime backed by Amazon Bedrock Agents.
///
/// Credentials and endpoint resolution follow the standard AWS SDK chain.
pub struct BedrockAgentRuntime {
    client: aws_sdk_bedrockagentruntime::Client,
}

impl BedrockAgentRuntime {
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_bedrockagentruntime::Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl AgentRuntime for BedrockAgentRuntime {
    async fn invoke(&self, invocation: AgentInvocation) -> Result<AgentReply> {
        let mut session_state = SessionState::builder();
        for (key, value) in invocation.session_attributes {
            session_state = session_state.session_attributes(key, value);
        }

        let output = self
            .client
            .invoke_agent()
            .agent_id(invocation.agent_id)
            .agent_alias_id(invocation.alias_id)
            .session_id(invocation.session_id)
            .input_text(invocation.input_text)
            .session_state(session_state.build())
            .send()
            .await
            .map_err(|e| AgentError::Invoke(e.to_string()))?;

        // Adapt the SDK event receiver into a plain byte-chunk stream. Events
        // other than completion chunks (traces, return-control) carry no reply
        // text and are skipped.
        let chunks = futures::stream::unfold(output.completion, |mut receiver| async move {
            loop {
                match receiver.recv().await {
                    Ok(Some(ResponseStream::Chunk(part))) => {
                        let bytes = part
                            .bytes()
                            .map(|blob| Bytes::copy_from_slice(blob.as_ref()))
                            .unwrap_or_default();
                        return Some((Ok(bytes), receiver));
                    }
                    Ok(Some(_)) => continue,
                    Ok(None) => return None,
                    Err(e) => return Some((Err(AgentError::Stream(e.to_string())), receiver)),
                }
            }
        });

        Ok(AgentReply::new(chunks))
    }
}
