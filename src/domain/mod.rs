//! Domain types for the refinement loop.

pub mod draft;
pub mod outcome;

pub use draft::Draft;
pub use outcome::{Decision, HaltReason, RefinementOutcome};
