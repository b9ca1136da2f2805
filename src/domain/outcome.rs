//! Outcome types for a refinement run.

use serde::{Deserialize, Serialize};

use crate::domain::Draft;

/// Why the loop halted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HaltReason {
    /// The critique score reached the configured threshold.
    ThresholdMet,
    /// The iteration cap was reached before the threshold.
    CapReached,
}

/// Decision returned by the termination policy after each evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Continue,
    Halt(HaltReason),
}

impl Decision {
    /// Returns true if the decision ends the loop.
    pub fn is_halt(&self) -> bool {
        matches!(self, Decision::Halt(_))
    }
}

/// Final result of a successful refinement run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefinementOutcome {
    /// The draft as of the last completed evaluation.
    pub draft: Draft,

    /// Why the executor halted.
    pub halt_reason: HaltReason,
}
