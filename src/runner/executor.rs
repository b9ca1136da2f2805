//! Executor - sequences the generate and evaluate steps until the
//! termination policy halts the loop.
//!
//! Each pass runs the generation step, then the evaluation step, then asks
//! the policy whether to loop back or halt. Steps run strictly
//! sequentially; any step failure ends the run with an error naming the
//! step. The iteration cap bounds the loop regardless of how the
//! collaborator scores.

use std::sync::Arc;

use crate::domain::{Decision, Draft, HaltReason, RefinementOutcome};
use crate::error::{RefinrError, Result};
use crate::llm::LlmClient;
use crate::policy::TerminationPolicy;
use crate::steps::{EvaluateStep, GenerateStep, Step};

/// Phase of the executor state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Running the generation step.
    Generating,
    /// Running the evaluation step.
    Evaluating,
    /// Terminal - the policy has halted the loop.
    Halted(HaltReason),
}

/// Sequences steps over a draft until the policy halts.
pub struct Executor {
    generate: Arc<dyn Step>,
    evaluate: Arc<dyn Step>,
    policy: TerminationPolicy,
}

impl Executor {
    /// Create an executor from explicit steps and a policy.
    pub fn new(generate: Arc<dyn Step>, evaluate: Arc<dyn Step>, policy: TerminationPolicy) -> Self {
        Self {
            generate,
            evaluate,
            policy,
        }
    }

    /// Wire an executor with the default generation and evaluation steps
    /// over a single collaborator.
    pub fn with_client(client: Arc<dyn LlmClient>, policy: TerminationPolicy) -> Self {
        Self::new(
            Arc::new(GenerateStep::new(client.clone())),
            Arc::new(EvaluateStep::new(client)),
            policy,
        )
    }

    /// Run the loop to completion.
    ///
    /// Returns the draft as of the last completed evaluation together with
    /// the halt reason. At most `max_iterations` generate+evaluate pairs
    /// execute. The policy and the initial draft are checked before any
    /// step runs.
    pub async fn run(&self, initial: Draft) -> Result<RefinementOutcome> {
        self.policy.validate()?;
        if initial.question.trim().is_empty() {
            return Err(RefinrError::InvalidState(
                "initial draft has no question".to_string(),
            ));
        }

        let mut draft = initial;
        let mut phase = Phase::Generating;

        let halt_reason = loop {
            phase = match phase {
                Phase::Generating => {
                    tracing::debug!("running {} step", self.generate.name());
                    draft = self.generate.apply(&draft).await?;
                    Phase::Evaluating
                }
                Phase::Evaluating => {
                    tracing::debug!("running {} step", self.evaluate.name());
                    draft = self.evaluate.apply(&draft).await?;
                    match self.policy.decide(&draft) {
                        Decision::Continue => Phase::Generating,
                        Decision::Halt(reason) => Phase::Halted(reason),
                    }
                }
                Phase::Halted(reason) => break reason,
            };
        };

        tracing::info!(
            "halted after iteration {} with score {}: {:?}",
            draft.iteration,
            draft.score,
            halt_reason
        );
        Ok(RefinementOutcome { draft, halt_reason })
    }
}
