//! Loop execution - the executor state machine.

pub mod executor;

pub use executor::{Executor, Phase};
