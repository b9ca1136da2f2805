//! Evaluation step - grades the current answer and records the critique.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::critique::parse_critique;
use crate::domain::Draft;
use crate::error::{RefinrError, Result};
use crate::llm::{CompletionRequest, LlmClient};
use crate::prompt::{CritiqueCriteria, GRADER_SYSTEM_PROMPT};
use crate::steps::{DEFAULT_CALL_TIMEOUT, Step};

/// Grades the current answer against fixed criteria. Malformed grader
/// output degrades to the parser defaults and never fails the step;
/// only a failed collaborator call yields `EvaluationFailed`.
pub struct EvaluateStep {
    client: Arc<dyn LlmClient>,
    criteria: CritiqueCriteria,
    timeout: Duration,
    max_tokens: Option<u32>,
}

impl EvaluateStep {
    /// Create an evaluation step with the default answer criteria.
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self {
            client,
            criteria: CritiqueCriteria::answer_criteria(),
            timeout: DEFAULT_CALL_TIMEOUT,
            max_tokens: None,
        }
    }

    /// Replace the grading criteria.
    pub fn with_criteria(mut self, criteria: CritiqueCriteria) -> Self {
        self.criteria = criteria;
        self
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
impl Step for EvaluateStep {
    async fn apply(&self, draft: &Draft) -> Result<Draft> {
        if draft.answer.trim().is_empty() {
            return Err(RefinrError::InvalidState(
                "cannot evaluate an empty answer".to_string(),
            ));
        }

        let mut request = CompletionRequest::new(GRADER_SYSTEM_PROMPT)
            .with_user_message(self.criteria.build_prompt(&draft.answer));
        if let Some(max_tokens) = self.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }

        let response = tokio::time::timeout(self.timeout, self.client.complete(request))
            .await
            .map_err(|_| {
                RefinrError::EvaluationFailed(format!(
                    "collaborator call timed out after {:?}",
                    self.timeout
                ))
            })?
            .map_err(|e| RefinrError::EvaluationFailed(e.to_string()))?;

        let critique = parse_critique(&response.content);
        tracing::debug!(
            "evaluated iteration {}: score {}",
            draft.iteration,
            critique.score
        );
        Ok(draft.with_critique(critique.score, critique.feedback))
    }

    fn name(&self) -> &str {
        "evaluate"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::critique::DEFAULT_FEEDBACK;
    use crate::llm::{CompletionResponse, MockLlmClient};

    #[tokio::test]
    async fn test_evaluate_records_critique() {
        let client = Arc::new(MockLlmClient::new(vec![CompletionResponse::text(
            "SCORE: 8\nFEEDBACK: Missing an example.",
        )]));
        let step = EvaluateStep::new(client);

        let draft = Draft::new("q").with_answer("attempt");
        let next = step.apply(&draft).await.unwrap();

        assert_eq!(next.score, 8);
        assert_eq!(next.feedback, "Missing an example.");
        // Answer and iteration are untouched by evaluation.
        assert_eq!(next.answer, "attempt");
        assert_eq!(next.iteration, 1);
    }

    #[tokio::test]
    async fn test_evaluate_garbage_output_degrades_to_defaults() {
        let client = Arc::new(MockLlmClient::new(vec![CompletionResponse::text(
            "garbage text",
        )]));
        let step = EvaluateStep::new(client);

        let draft = Draft::new("q").with_answer("attempt");
        let next = step.apply(&draft).await.unwrap();

        assert_eq!(next.score, 0);
        assert_eq!(next.feedback, DEFAULT_FEEDBACK);
    }

    #[tokio::test]
    async fn test_evaluate_rejects_empty_answer() {
        let client = Arc::new(MockLlmClient::new(vec![CompletionResponse::text("x")]));
        let step = EvaluateStep::new(client);

        let err = step.apply(&Draft::new("q")).await.unwrap_err();
        assert!(matches!(err, RefinrError::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_evaluate_call_failure_propagates() {
        let client = Arc::new(MockLlmClient::failing("grader down"));
        let step = EvaluateStep::new(client);

        let draft = Draft::new("q").with_answer("attempt");
        let err = step.apply(&draft).await.unwrap_err();

        assert!(matches!(err, RefinrError::EvaluationFailed(_)));
        assert_eq!(draft.score, 0);
        assert!(draft.feedback.is_empty());
    }

    #[tokio::test]
    async fn test_evaluate_custom_criteria() {
        let client = Arc::new(MockLlmClient::new(vec![CompletionResponse::text(
            "SCORE: 10\nFEEDBACK: Perfect.",
        )]));
        let criteria = CritiqueCriteria::new("summary").with_criterion("Fits in one paragraph");
        let step = EvaluateStep::new(client).with_criteria(criteria);

        let draft = Draft::new("q").with_answer("short");
        let next = step.apply(&draft).await.unwrap();
        assert_eq!(next.score, 10);
    }

    #[test]
    fn test_step_name() {
        let client = Arc::new(MockLlmClient::new(vec![]));
        assert_eq!(EvaluateStep::new(client).name(), "evaluate");
    }
}
