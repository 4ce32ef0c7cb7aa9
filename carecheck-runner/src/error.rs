//! Error types for the pipeline runner

use carecheck_client::ClientError;
use carecheck_core::domain::context::ContextKey;
use thiserror::Error;

/// Why a bearer token could not be obtained
#[derive(Debug, Error)]
pub enum AuthError {
    /// The credential exchange answered with a non-2xx status
    #[error("credential exchange rejected (status {status}): {message}")]
    Rejected { status: u16, message: String },

    /// The exchange succeeded but carried no token
    #[error("credential exchange returned an empty token")]
    EmptyToken,

    /// The token is too short to be a real bearer token
    #[error("token has {len} characters, below the {min}-character minimum")]
    TokenTooShort { len: usize, min: usize },

    /// The exchange never produced a response
    #[error("credential exchange failed: {0}")]
    Transport(ClientError),
}

impl From<ClientError> for AuthError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::ApiError { status, message } => AuthError::Rejected { status, message },
            other => AuthError::Transport(other),
        }
    }
}

/// Errors raised while defining or starting a pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("pipeline '{0}' has no steps")]
    Empty(String),

    /// A step reads a context field that no earlier step writes
    #[error("step '{step}' reads {key} but no earlier step writes it")]
    UnsatisfiedInput { step: String, key: ContextKey },

    /// Two steps write the same context field
    #[error("step '{step}' writes {key}, which '{writer}' already writes")]
    DuplicateOutput {
        step: String,
        key: ContextKey,
        writer: String,
    },

    /// Another run is still using this executor
    #[error("a pipeline run is already in progress")]
    RunInProgress,
}
