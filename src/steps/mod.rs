//! Steps - the units of work that transform a draft.
//!
//! A step derives a new draft from a borrowed previous one. The input draft
//! is never mutated, so a failed step leaks no partial state to the caller.

pub mod evaluate;
pub mod generate;

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::Draft;
use crate::error::Result;

pub use evaluate::EvaluateStep;
pub use generate::GenerateStep;

/// Default timeout for a single collaborator call.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(300);

/// One unit of work in the refinement loop.
#[async_trait]
pub trait Step: Send + Sync {
    /// Apply this step to the draft, producing the next draft.
    async fn apply(&self, draft: &Draft) -> Result<Draft>;

    /// Name used in error reports and logs.
    fn name(&self) -> &str;
}
