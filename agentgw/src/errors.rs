use crate::agent::AgentError;
use crate::storage::StorageError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    /// Caller supplied incomplete or invalid request data
    #[error("{message}")]
    Validation { message: String },

    /// Deployment misconfiguration discovered at request time
    #[error("{message}")]
    Configuration { message: String },

    /// The storage service call failed
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The agent runtime call failed (invocation or streaming read)
    #[error(transparent)]
    Agent(#[from] AgentError),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation { .. } => StatusCode::BAD_REQUEST,
            Error::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Storage(_) | Error::Agent(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable error class, independent of the message text.
    ///
    /// Clients should branch on this rather than parsing the `error` string,
    /// which is free-form and may change between releases.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Validation { .. } => "validation",
            Error::Configuration { .. } => "configuration",
            Error::Storage(_) | Error::Agent(_) => "upstream",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Log full error details - different log levels based on severity
        match &self {
            Error::Validation { .. } => {
                tracing::debug!("Client error: {}", self);
            }
            Error::Configuration { .. } => {
                tracing::error!("Configuration error: {}", self);
            }
            Error::Storage(_) | Error::Agent(_) => {
                tracing::error!("Upstream service error: {:#}", self);
            }
        }

        let status = self.status_code();
        let body = json!({
            "ok": false,
            "error": self.to_string(),
            "kind": self.kind(),
        });

        (status, Json(body)).into_response()
    }
}

/// Type alias for handler results
pub type Result<T> = std::result::Result<T, Error>;
