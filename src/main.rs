use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

mod cli;
mod config;

use cli::Cli;
use config::Config;

use refinr::domain::{Draft, HaltReason};
use refinr::llm::{AnthropicClient, LlmClient};
use refinr::policy::TerminationPolicy;
use refinr::runner::Executor;
use refinr::steps::{EvaluateStep, GenerateStep};

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("refinr")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("refinr.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

async fn run_refinement(cli: &Cli, config: &Config) -> Result<()> {
    let mut llm_config = config.llm.to_anthropic();
    if let Some(model) = &cli.model {
        llm_config.model = model.clone();
    }
    let call_timeout = llm_config.timeout;

    let client =
        Arc::new(AnthropicClient::new(llm_config).context("Failed to create LLM client")?);

    let policy = TerminationPolicy::new(
        cli.threshold.unwrap_or(config.refinement.score_threshold),
        cli.max_iterations.unwrap_or(config.refinement.max_iterations),
    );

    if cli.is_verbose() {
        println!(
            "{} {} (threshold {}, max {} iterations)",
            "Refining:".cyan(),
            cli.question,
            policy.score_threshold,
            policy.max_iterations
        );
    }

    let generate = GenerateStep::new(client.clone())
        .with_timeout(call_timeout)
        .with_max_tokens(config.llm.max_tokens);
    let evaluate = EvaluateStep::new(client.clone())
        .with_timeout(call_timeout)
        .with_max_tokens(config.llm.max_tokens);
    let executor = Executor::new(Arc::new(generate), Arc::new(evaluate), policy);

    let outcome = executor
        .run(Draft::new(&cli.question))
        .await
        .context("Refinement run failed")?;

    let usage = client.total_usage();
    info!(
        "Run finished: {} input tokens, {} output tokens (${:.4})",
        usage.input_tokens,
        usage.output_tokens,
        usage.cost_usd(client.model())
    );

    println!("\n{}", "--- Answer ---".green().bold());
    println!("{}", outcome.draft.answer);
    println!("\n{}", "--- Critique ---".green().bold());
    println!("Score: {}", outcome.draft.score);
    println!("Feedback: {}", outcome.draft.feedback);
    println!("\nIterations: {}", outcome.draft.iteration);

    let reason = match outcome.halt_reason {
        HaltReason::ThresholdMet => "score threshold met".green(),
        HaltReason::CapReached => "iteration cap reached".yellow(),
    };
    println!("Halted: {}", reason);

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load and validate configuration before anything runs
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    run_refinement(&cli, &config).await
}
