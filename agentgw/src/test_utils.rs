//! Test utilities: mock seam implementations and server construction.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use bytes::Bytes;

use crate::agent::{AgentError, AgentInvocation, AgentReply, AgentRuntime};
use crate::config::Config;
use crate::storage::{StorageError, UploadGrant, UploadStore};
use crate::{AppState, build_router};

/// Upload store that signs nothing: returns a deterministic URL scoped to the
/// requested key, or a configured failure.
pub struct MockUploadStore {
    bucket: String,
    fail: Option<String>,
}

impl MockUploadStore {
    pub fn new() -> Self {
        Self {
            bucket: "test-bucket".to_string(),
            fail: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            bucket: "test-bucket".to_string(),
            fail: Some(message.to_string()),
        }
    }
}

#[async_trait]
impl UploadStore for MockUploadStore {
    async fn presign_put(&self, key: &str, content_type: &str) -> Result<UploadGrant, StorageError> {
        if let Some(message) = &self.fail {
            return Err(StorageError::Presign(message.clone()));
        }
        Ok(UploadGrant {
            bucket: self.bucket.clone(),
            key: key.to_string(),
            upload_url: format!("https://{}.s3.test/{key}?X-Amz-Expires=60&content-type={content_type}", self.bucket),
        })
    }
}

/// Agent runtime that records every invocation and replies with a fixed set of
/// chunks, or a configured failure.
pub struct StubAgentRuntime {
    chunks: Vec<Bytes>,
    fail: Option<String>,
    invocations: Mutex<Vec<AgentInvocation>>,
}

impl StubAgentRuntime {
    pub fn replying(chunks: &[&str]) -> Self {
        Self {
            chunks: chunks.iter().map(|c| Bytes::copy_from_slice(c.as_bytes())).collect(),
            fail: None,
            invocations: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            chunks: Vec::new(),
            fail: Some(message.to_string()),
            invocations: Mutex::new(Vec::new()),
        }
    }

    /// Invocations seen so far, in order.
    pub fn recorded(&self) -> Vec<AgentInvocation> {
        self.invocations.lock().unwrap().clone()
    }
}

#[async_trait]
impl AgentRuntime for StubAgentRuntime {
    async fn invoke(&self, invocation: AgentInvocation) -> Result<AgentReply, AgentError> {
        self.invocations.lock().unwrap().push(invocation);
        if let Some(message) = &self.fail {
            return Err(AgentError::Invoke(message.clone()));
        }
        Ok(AgentReply::from_chunks(self.chunks.clone()))
    }
}

/// Config with the required deployment values filled in.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.agent.agent_id = "ABCDEF1234".to_string();
    config.agent.alias_id = "TSTALIASID".to_string();
    config.upload.bucket = "test-bucket".to_string();
    config
}

/// Test server over the full router, wired with the given agent stub and a
/// default mock upload store. Returns the stub for invocation inspection.
pub fn create_test_server_with(config: Config, agent: Arc<StubAgentRuntime>) -> TestServer {
    let state = AppState::builder()
        .config(config)
        .uploads(Arc::new(MockUploadStore::new()))
        .agent(agent)
        .build();
    TestServer::new(build_router(state)).expect("Failed to create test server")
}

/// Test server with default mocks: replies "Hello, world" in three chunks.
pub fn create_test_server(config: Config) -> (TestServer, Arc<StubAgentRuntime>) {
    let agent = Arc::new(StubAgentRuntime::replying(&["Hel", "lo, ", "world"]));
    (create_test_server_with(config, agent.clone()), agent)
}

/// Test server whose upload store fails every presign call.
pub fn create_test_server_with_failing_store(config: Config) -> TestServer {
    let state = AppState::builder()
        .config(config)
        .uploads(Arc::new(MockUploadStore::failing("bucket policy forbids presign")))
        .agent(Arc::new(StubAgentRuntime::replying(&[])))
        .build();
    TestServer::new(build_router(state)).expect("Failed to create test server")
}
