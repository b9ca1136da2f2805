//! CLI definition using clap.
//!
//! One invocation runs one refinement loop: the question is the single
//! positional argument, everything else overrides configuration.

use clap::Parser;
use std::path::PathBuf;

/// Refinr - iterative answer refinement through a generate/critique loop
#[derive(Parser, Debug)]
#[command(name = "refinr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The question to answer and refine
    pub question: String,

    /// Optional config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Score at or above which the loop halts (overrides config)
    #[arg(short = 't', long)]
    pub threshold: Option<i64>,

    /// Maximum generation iterations (overrides config)
    #[arg(short = 'm', long = "max-iterations")]
    pub max_iterations: Option<u32>,

    /// Model to use (overrides config)
    #[arg(long)]
    pub model: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}
