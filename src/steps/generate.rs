//! Generation step - asks the collaborator for a new or improved answer.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::Draft;
use crate::error::{RefinrError, Result};
use crate::llm::{CompletionRequest, LlmClient};
use crate::prompt::{self, GENERATOR_SYSTEM_PROMPT};
use crate::steps::{DEFAULT_CALL_TIMEOUT, Step};

/// Produces the next answer from the question, the prior answer, and the
/// prior critique feedback. One collaborator call per application; failures
/// propagate as `GenerationFailed` - a blank answer is never substituted.
pub struct GenerateStep {
    client: Arc<dyn LlmClient>,
    timeout: Duration,
    max_tokens: Option<u32>,
}

impl GenerateStep {
    /// Create a generation step backed by the given collaborator.
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self {
            client,
            timeout: DEFAULT_CALL_TIMEOUT,
            max_tokens: None,
        }
    }

    /// Set the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set max tokens for the response.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

#[async_trait]
impl Step for GenerateStep {
    async fn apply(&self, draft: &Draft) -> Result<Draft> {
        if draft.question.trim().is_empty() {
            return Err(RefinrError::InvalidState(
                "question must not be empty".to_string(),
            ));
        }

        let mut request = CompletionRequest::new(GENERATOR_SYSTEM_PROMPT)
            .with_user_message(prompt::generation_prompt(draft));
        if let Some(max_tokens) = self.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }

        let response = tokio::time::timeout(self.timeout, self.client.complete(request))
            .await
            .map_err(|_| {
                RefinrError::GenerationFailed(format!(
                    "collaborator call timed out after {:?}",
                    self.timeout
                ))
            })?
            .map_err(|e| RefinrError::GenerationFailed(e.to_string()))?;

        let answer = response.content.trim();
        if answer.is_empty() {
            return Err(RefinrError::GenerationFailed(
                "collaborator returned an empty response".to_string(),
            ));
        }

        tracing::debug!(
            "generated answer for iteration {} ({} chars)",
            draft.iteration + 1,
            answer.len()
        );
        Ok(draft.with_answer(answer))
    }

    fn name(&self) -> &str {
        "generate"
    }
}
