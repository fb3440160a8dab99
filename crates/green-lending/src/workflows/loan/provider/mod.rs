//! Outbound generative completion services used to score evaluations.

mod gemini;

pub use gemini::GeminiProvider;

use async_trait::async_trait;
use serde_json::Value;

pub const JSON_MIME_TYPE: &str = "application/json";

/// Prompt plus the schema the reply must conform to.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub response_mime_type: &'static str,
    pub response_schema: Value,
}

/// Text/JSON completion backend. `Ok(None)` means the service answered without any text.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn generate(&self, request: &CompletionRequest) -> Result<Option<String>, ProviderError>;
}

/// Failure talking to the completion service.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("no API credential configured for the completion service")]
    MissingCredential,
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("completion request timed out")]
    Timeout,
    #[error("completion transport failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("completion service returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("completion envelope could not be decoded: {0}")]
    MalformedResponse(#[source] serde_json::Error),
}

impl ProviderError {
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else {
            ProviderError::Transport(err)
        }
    }

    /// Short machine-readable label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::MissingCredential => "missing_credential",
            ProviderError::Client(_) => "client",
            ProviderError::Timeout => "timeout",
            ProviderError::Transport(_) => "transport",
            ProviderError::Status { .. } => "status",
            ProviderError::MalformedResponse(_) => "malformed_response",
        }
    }
}
