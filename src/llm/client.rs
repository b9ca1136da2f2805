//! Core LLM client trait, error types, and the scripted test client.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::llm::types::{CompletionRequest, CompletionResponse};

/// Stateless text-generation collaborator - each call is independent.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Single completion request (suspends until complete)
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;

    /// Model identifier used for requests
    fn model(&self) -> &str;

    /// Whether the client is configured well enough to make calls
    fn is_ready(&self) -> bool;
}

/// Errors that can occur at the LLM boundary
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Missing API key: environment variable {env_var} not set")]
    MissingApiKey { env_var: String },
}

impl LlmError {
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::RateLimited { .. } => true,
            LlmError::ApiError { status, .. } => *status >= 500,
            LlmError::Network(_) => true,
            LlmError::InvalidResponse(_) => false,
            LlmError::MissingApiKey { .. } => false,
        }
    }
}

/// Scripted client for tests - yields queued replies in order.
///
/// Each `complete` call pops the next reply; an exhausted queue is an
/// `InvalidResponse` error, which makes over-calling visible in tests.
pub struct MockLlmClient {
    replies: Mutex<VecDeque<Result<CompletionResponse, String>>>,
}

impl MockLlmClient {
    /// Create a mock that yields the given responses in order.
    pub fn new(responses: Vec<CompletionResponse>) -> Self {
        Self {
            replies: Mutex::new(responses.into_iter().map(Ok).collect()),
        }
    }

    /// Create a mock whose first call fails with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        let client = Self::new(Vec::new());
        client.push_failure(message);
        client
    }

    /// Queue a failure behind the already-queued replies.
    pub fn push_failure(&self, message: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Err(message.into()));
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(LlmError::ApiError {
                status: 503,
                message,
            }),
            None => Err(LlmError::InvalidResponse(
                "mock reply queue exhausted".to_string(),
            )),
        }
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    fn is_ready(&self) -> bool {
        true
    }
}
