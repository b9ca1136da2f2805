//! Termination policy - decides whether the loop continues or halts.
//!
//! Two conditions are checked in order: the score threshold, then the
//! iteration cap. The cap guarantees termination regardless of how the
//! collaborator scores, because the iteration count is strictly increasing.

use crate::domain::{Decision, Draft, HaltReason};
use crate::error::{RefinrError, Result};

/// Default score at or above which the loop halts.
pub const DEFAULT_SCORE_THRESHOLD: i64 = 9;

/// Default hard cap on generation iterations.
pub const DEFAULT_MAX_ITERATIONS: u32 = 4;

/// The continue-or-halt gate applied after every evaluation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminationPolicy {
    /// Score at or above which the loop halts.
    pub score_threshold: i64,

    /// Maximum generation iterations before a forced halt.
    pub max_iterations: u32,
}

impl Default for TerminationPolicy {
    fn default() -> Self {
        Self {
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl TerminationPolicy {
    /// Create a policy with explicit threshold and cap.
    pub fn new(score_threshold: i64, max_iterations: u32) -> Self {
        Self {
            score_threshold,
            max_iterations,
        }
    }

    /// Reject configurations under which the loop could not run at all.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(RefinrError::Config(
                "max-iterations must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Decide whether the loop continues after an evaluation.
    ///
    /// The threshold is checked first: a passing score halts with
    /// `ThresholdMet` even on the final permitted iteration.
    pub fn decide(&self, draft: &Draft) -> Decision {
        if draft.score >= self.score_threshold {
            return Decision::Halt(HaltReason::ThresholdMet);
        }
        if draft.iteration >= self.max_iterations {
            return Decision::Halt(HaltReason::CapReached);
        }
        Decision::Continue
    }
}
